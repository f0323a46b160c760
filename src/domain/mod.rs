pub mod principal;
pub mod product;
pub mod review;
pub mod user;

pub use principal::*;
pub use product::*;
pub use review::*;
pub use user::*;
