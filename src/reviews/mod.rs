//! Review orchestration: the root actor composing authorization checks,
//! validation, and catalog delegation for review operations.

pub mod service;

pub use service::ReviewService;
