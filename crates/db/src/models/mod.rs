pub mod employee;
pub mod project;
pub mod resource;
pub mod resource_usage;
pub mod task;
