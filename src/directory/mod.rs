//! User directory: the backing store for per-request principal
//! resolution and role grant/revoke.

mod entity;

pub use entity::*;
