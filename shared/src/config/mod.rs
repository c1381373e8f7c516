//! Configuration module
//!
//! - `logging` - Log defaults per deployment environment

pub mod logging;

pub use logging::{Environment, LogFormat, LoggingConfig};
