//! Domain types, error taxonomy, and field validation for the project
//! planner. Pure logic only -- no I/O and no database dependencies.

pub mod error;
pub mod types;
pub mod validation;
