//! Shared utilities and common types for Masjid Notify
//!
//! This crate provides common functionality used across all server modules:
//! - Environment detection and logging configuration
//! - Phone number conversions between local, bare country code and E.164 forms
//! - Phone number masking for logs

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, LogFormat, LoggingConfig};
pub use utils::phone::{self, mask_phone_number, PhoneNumber, PhoneShape};
