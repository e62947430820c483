//! Domain primitives shared by the storage and HTTP layers.

pub mod error;
pub mod roles;
pub mod types;
