//! Network messages - communication between App and Network layers

use crate::form::FieldValues;
use crate::models::{Record, RecordId, ResourceKind};
use crate::network::ApiError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load a whole collection
    FetchAll { id: u64, kind: ResourceKind },
    /// Create a record from submitted form values
    Create {
        id: u64,
        kind: ResourceKind,
        values: FieldValues,
    },
    /// Overwrite the fields of an existing record
    Update {
        id: u64,
        kind: ResourceKind,
        record_id: RecordId,
        values: FieldValues,
    },
    /// Delete a record
    Remove {
        id: u64,
        kind: ResourceKind,
        record_id: RecordId,
    },
    /// List the museums a curator works at
    FetchCuratorMuseums { id: u64, curator_id: RecordId },
    AssignCurator {
        id: u64,
        museum_id: RecordId,
        curator_id: RecordId,
    },
    UnassignCurator {
        id: u64,
        museum_id: RecordId,
        curator_id: RecordId,
    },

    /// Shutdown the network actor
    Shutdown,
}

/// Which call a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Remove,
    CuratorMuseums,
    AssignCurator,
    UnassignCurator,
}

impl Operation {
    /// Lead-in for an error notice, e.g. "Error al eliminar museo"
    pub fn failure_text(self, kind: ResourceKind) -> String {
        let noun = kind.singular().to_lowercase();
        match self {
            Operation::Fetch => format!("Error al obtener {}", kind.plural().to_lowercase()),
            Operation::Create => format!("Error al agregar {noun}"),
            Operation::Update => format!("Error al actualizar {noun}"),
            Operation::Remove => format!("Error al eliminar {noun}"),
            Operation::CuratorMuseums => "Error al obtener museos del curador".to_string(),
            Operation::AssignCurator => "Error al asignar curador".to_string(),
            Operation::UnassignCurator => "Error al desasignar curador".to_string(),
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Fetched {
        id: u64,
        kind: ResourceKind,
        records: Vec<Record>,
    },
    Created {
        id: u64,
        kind: ResourceKind,
        record: Record,
    },
    Updated {
        id: u64,
        kind: ResourceKind,
        record: Record,
    },
    Removed {
        id: u64,
        kind: ResourceKind,
        record_id: RecordId,
    },
    CuratorMuseums {
        id: u64,
        museums: Vec<Record>,
    },
    CuratorAssigned {
        id: u64,
        museum_id: RecordId,
        curator_id: RecordId,
    },
    CuratorUnassigned {
        id: u64,
        museum_id: RecordId,
        curator_id: RecordId,
    },
    /// Any call that ended in an [`ApiError`]
    Failed {
        id: u64,
        kind: ResourceKind,
        operation: Operation,
        error: ApiError,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Fetched { id, .. } => *id,
            NetworkResponse::Created { id, .. } => *id,
            NetworkResponse::Updated { id, .. } => *id,
            NetworkResponse::Removed { id, .. } => *id,
            NetworkResponse::CuratorMuseums { id, .. } => *id,
            NetworkResponse::CuratorAssigned { id, .. } => *id,
            NetworkResponse::CuratorUnassigned { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
