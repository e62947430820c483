//! Request handlers.
//!
//! [`crud`] holds the generic list/get/create/update/delete handlers shared
//! by every entity type. [`authentication`] issues admin tokens.

pub mod authentication;
pub mod crud;
