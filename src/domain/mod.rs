//! Domain layer: value objects, entities, and errors

pub mod audio;
pub mod config;
pub mod error;
pub mod profile;
pub mod session;
pub mod summary;
