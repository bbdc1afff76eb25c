//! Data models for the salon server

pub mod catalog;
pub mod payment;
pub mod visit;

// Re-export commonly used types
pub use catalog::FormData;
pub use visit::{CreateVisit, PaymentStatus, RangeQuery, ServiceLine, Visit};
