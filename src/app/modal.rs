//! The one popup that can be open at a time

use crate::form::FormState;
use crate::messages::ui_events::ModalKind;
use crate::models::{Record, ResourceKind};

/// Assign or unassign a curator on a museum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkAction {
    Assign,
    Unassign,
}

impl LinkAction {
    pub fn title(self) -> &'static str {
        match self {
            LinkAction::Assign => "Asignar curador",
            LinkAction::Unassign => "Desasignar curador",
        }
    }
}

/// Progress of a museums-by-curator lookup
#[derive(Clone, Debug, PartialEq)]
pub enum MuseumLookup {
    Loading,
    Loaded(Vec<Record>),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub enum Modal {
    #[default]
    Closed,
    Adding {
        kind: ResourceKind,
        form: FormState,
    },
    Editing {
        kind: ResourceKind,
        record: Record,
        form: FormState,
    },
    Viewing {
        kind: ResourceKind,
        record: Record,
    },
    ConfirmDelete {
        kind: ResourceKind,
        record: Record,
    },
    Linking {
        museum: Record,
        action: LinkAction,
        form: FormState,
    },
    CuratorMuseums {
        curator: Record,
        request_id: u64,
        result: MuseumLookup,
    },
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Modal::Closed => ModalKind::None,
            Modal::Adding { .. } | Modal::Editing { .. } | Modal::Linking { .. } => ModalKind::Form,
            Modal::Viewing { .. } | Modal::CuratorMuseums { .. } => ModalKind::Detail,
            Modal::ConfirmDelete { .. } => ModalKind::Confirm,
        }
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            Modal::Adding { form, .. } | Modal::Editing { form, .. } | Modal::Linking { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Modal::Adding { form, .. } | Modal::Editing { form, .. } | Modal::Linking { form, .. } => Some(form),
            _ => None,
        }
    }

    /// True when the open form is waiting on request `id`
    pub fn is_waiting_on(&self, id: u64) -> bool {
        self.form().and_then(FormState::pending_request) == Some(id)
    }

    /// Popup title
    pub fn title(&self) -> String {
        match self {
            Modal::Closed => String::new(),
            Modal::Adding { kind, .. } => format!("Agregar {}", kind.singular()),
            Modal::Editing { kind, .. } => format!("Editar {}", kind.singular()),
            Modal::Viewing { kind, .. } => format!("Detalles del {}", kind.singular()),
            Modal::ConfirmDelete { kind, .. } => format!("Eliminar {}", kind.singular()),
            Modal::Linking { action, .. } => action.title().to_string(),
            Modal::CuratorMuseums { .. } => "Museos del curador".to_string(),
        }
    }
}
