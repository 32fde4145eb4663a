//! Application layer: use cases and port interfaces

pub mod controller;
pub mod ports;
pub mod start_session;

pub use controller::{ControllerError, SessionController, SubmitOutcome};
pub use start_session::{StartSession, StartSessionError};
