pub mod catalog;
pub mod project;
pub mod traceability;
pub mod user;
