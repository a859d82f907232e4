//! Network layer - HTTP calls to the museums and curators services
//!
//! The Network actor receives API commands and sends back responses.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::{execute_command, NetworkActor};
pub use client::ApiClient;
pub use error::ApiError;
