//! Authentication primitives.
//!
//! - [`credentials`] -- the configured admin account and the login check.
//! - [`jwt`] -- JWT access-token generation and validation.

pub mod credentials;
pub mod jwt;
