//! App state - pure data structure with no I/O logic

use crate::app::modal::Modal;
use crate::app::view::ListView;
use crate::constants::NOTICE_TTL_SECS;
use crate::messages::RenderState;
use crate::models::ResourceKind;
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient status-bar message
#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
            timestamp: chrono::Local::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
            timestamp: chrono::Local::now(),
        }
    }

    pub fn is_expired(&self, now: chrono::DateTime<chrono::Local>) -> bool {
        now - self.timestamp >= chrono::Duration::seconds(NOTICE_TTL_SECS)
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub route: Route,

    // One list view per resource
    pub museums: ListView,
    pub curators: ListView,

    pub modal: Modal,
    pub notice: Option<Notice>,
    pub show_help: bool,

    pub next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            route: Route::default(),
            museums: ListView::new(ResourceKind::Museum),
            curators: ListView::new(ResourceKind::Curator),
            modal: Modal::Closed,
            notice: None,
            show_help: false,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn view(&self, kind: ResourceKind) -> &ListView {
        match kind {
            ResourceKind::Museum => &self.museums,
            ResourceKind::Curator => &self.curators,
        }
    }

    pub fn view_mut(&mut self, kind: ResourceKind) -> &mut ListView {
        match kind {
            ResourceKind::Museum => &mut self.museums,
            ResourceKind::Curator => &mut self.curators,
        }
    }

    pub fn active_view(&self) -> &ListView {
        self.view(self.route.resource())
    }

    pub fn active_view_mut(&mut self) -> &mut ListView {
        self.view_mut(self.route.resource())
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            route: self.route,
            view: self.active_view().clone(),
            modal: self.modal.clone(),
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
