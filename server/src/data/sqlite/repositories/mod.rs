//! SQLite repositories
//!
//! Row types (AccountRow, DepartmentRow, etc.) live in `crate::data::types`.

pub mod account;
pub mod department;

pub use account::{
    create_account, filter_accounts, find_accounts, get_account, get_by_username,
    soft_delete_account, update_account,
};
pub use department::{
    create_department, department_exists, filter_departments, find_departments, get_by_name,
    get_department, soft_delete_department, update_department,
};
