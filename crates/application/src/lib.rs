//! Application layer - Use cases and orchestration
//!
//! Holds the port definitions and the weather report pipeline that drives
//! the forecast and report adapters.

pub mod credentials;
pub mod error;
pub mod ports;
pub mod services;

pub use credentials::Credentials;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
