//! Job application tracking: the record service, its storage backends, and the HTML surface.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;
