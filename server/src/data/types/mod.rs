//! Shared data types for the transactional store

mod transactional;

pub use transactional::{
    AccountRow, AccountUpdate, DepartmentRow, DepartmentUpdate, NewAccount, NewDepartment,
};
