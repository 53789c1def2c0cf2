pub mod auth;
pub mod catalogs;
pub mod projects;
pub mod traceability;
pub mod users;
