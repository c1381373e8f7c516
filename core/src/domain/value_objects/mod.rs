//! Value objects representing immutable domain concepts.

pub mod broadcast_report;
pub mod send_result;

// Re-export commonly used types
pub use broadcast_report::{BroadcastReport, FailedDelivery};
pub use send_result::SendResult;
