pub mod catalog_client;
pub mod directory_client;
pub mod macros;
pub mod review_client;

pub use catalog_client::CatalogClient;
pub use directory_client::DirectoryClient;
pub use review_client::ReviewClient;
