//! Domain services for accounts and departments
//!
//! - `accounts` / `departments` - business rules around the repository
//! - `query` - turns raw listing input into validated filters
//! - `error` - service-level error type

pub mod accounts;
pub mod departments;
pub mod error;
pub mod query;

pub use accounts::{AccountService, CreateAccount};
pub use departments::DepartmentService;
pub use error::{ServiceError, codes};
pub use query::QueryPolicy;
