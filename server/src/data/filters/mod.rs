//! Dynamic query filter engine
//!
//! Callers describe what to match either as [`Criteria`] (per-field filters
//! plus free-text search, parsed from query params) or as a single
//! [`Expression`]. Both are composed into a [`Fragment`] tree that the SQLite
//! executor lowers to a parameterized `WHERE` clause.
//!
//! All logic is generic over an entity's static field table ([`EntityMeta`]).
//!
//! ## Usage
//!
//! ```no_run
//! use roster_server::data::filters::{
//!     ACCOUNT, Criteria, PageLimits, SqlParams, compose_criteria,
//! };
//!
//! let params = vec![("username.contains".to_string(), "an".to_string())];
//! let limits = PageLimits { default_size: 20, max_size: 500 };
//! let criteria = Criteria::from_params(&ACCOUNT, &params, limits).unwrap();
//! let mut sql_params = SqlParams::default();
//! let where_clause = compose_criteria(&criteria).to_sql(&mut sql_params);
//! ```

mod builder;
mod composer;
mod criteria;
mod entity;
mod error;
mod expression;
mod fragment;
mod page;
mod types;

pub use builder::build;
pub use composer::{compose_criteria, compose_expression, search_group};
pub use criteria::{Criteria, PageLimits};
pub use entity::{ACCOUNT, DEPARTMENT, EntityMeta, FieldMeta, ScalarKind};
pub use error::FilterError;
pub use expression::{Expression, ValidatedExpression};
pub use fragment::{Comparison, Fragment, SqlParams, SqlValue};
pub use page::{Page, PageRequest, SortDirection, SortOrder};
pub use types::{
    BooleanFilter, EnumFilter, FieldFilter, FieldValue, IntegerFilter, Operator, StringFilter,
};
