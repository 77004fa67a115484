//! API route handlers

pub mod accounts;
pub mod departments;
pub mod health;
