//! Repository layer.
//!
//! Every entity type goes through the same generic [`CrudRepo`], which adds
//! the existence checks (route parent, referenced rows, path/body identity)
//! on top of the raw [`Store`](crate::store::Store) operations.

pub mod crud_repo;

pub use crud_repo::{CrudRepo, RepoError, RepoResult};
