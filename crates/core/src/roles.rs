//! Well-known role name constants.
//!
//! The admin role is the only privilege level allowed to write. It is the
//! value carried in the `role` claim of issued tokens.

pub const ROLE_ADMIN: &str = "Admin";
