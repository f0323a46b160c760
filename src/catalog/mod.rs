//! Product catalog: owns products, each product owning its review
//! collection and cached rating summary.

pub mod aggregate;
pub mod service;
pub mod store;

pub use service::CatalogService;
