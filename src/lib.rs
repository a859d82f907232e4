//! # Museos TUI
//!
//! A terminal admin console for the museums and curators REST services.
//!
//! ## Features
//! - Museum and curator tables with create, edit, view and delete
//! - Schema-driven forms with required-field validation
//! - Museums of a curator, curator assignment on a museum
//! - Status-bar notices for every failed request
//! - YAML config file, environment and CLI overrides
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod form;
pub mod messages;
pub mod models;
pub mod network;
pub mod routes;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use models::{Curator, Museum, Record, RecordId, Resource, ResourceKind};
pub use form::{FieldSpec, FieldValues, FormState, ValidationError};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, ApiError, NetworkActor};
pub use routes::Route;
pub use store::{Change, Snapshot};
