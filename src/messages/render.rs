//! Render state - data structure sent from App layer to UI for rendering

use crate::app::modal::Modal;
use crate::app::state::Notice;
use crate::app::view::ListView;
use crate::messages::ui_events::ModalKind;
use crate::routes::Route;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub route: Route,

    /// The mounted list view; its snapshot is shared, not copied
    pub view: ListView,

    pub modal: Modal,
    pub notice: Option<Notice>,
    pub show_help: bool,
}

impl RenderState {
    pub fn modal_kind(&self) -> ModalKind {
        self.modal.kind()
    }

    /// The notice, unless it has outlived its display time
    pub fn latest_notice(&self) -> Option<&Notice> {
        let now = chrono::Local::now();
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }
}

impl Default for RenderState {
    fn default() -> Self {
        let route = Route::default();
        RenderState {
            route,
            view: ListView::new(route.resource()),
            modal: Modal::Closed,
            notice: None,
            show_help: false,
        }
    }
}
