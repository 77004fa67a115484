//! Predicate fragments
//!
//! A [`Fragment`] is a store-agnostic boolean condition tree built by pure
//! functions. It is lowered to a SQL `WHERE` clause in a single pass by
//! [`Fragment::to_sql`], which appends bind values to [`SqlParams`] in
//! placeholder order.

use crate::utils::sql::contains_pattern;

/// A bindable SQL value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Comparison applied to a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Eq(SqlValue),
    Ne(SqlValue),
    Gt(SqlValue),
    Lt(SqlValue),
    /// An empty list lowers to `1=0`; the builder never emits one, since an
    /// empty list leaves its filter unpopulated
    In(Vec<SqlValue>),
    /// An empty list lowers to `1=1`
    NotIn(Vec<SqlValue>),
    /// Case-insensitive substring match
    Contains(String),
    IsNull,
    IsNotNull,
}

/// Composable predicate tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Matches every record; identity of AND
    Always,
    And(Vec<Fragment>),
    Or(Vec<Fragment>),
    Compare {
        column: &'static str,
        comparison: Comparison,
    },
}

/// Collects SQL parameters during lowering (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl Fragment {
    pub fn compare(column: &'static str, comparison: Comparison) -> Self {
        Self::Compare { column, comparison }
    }

    /// AND two fragments, dropping identities and flattening nested ANDs
    pub fn and(self, other: Fragment) -> Fragment {
        match (self, other) {
            (Self::Always, f) | (f, Self::Always) => f,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), f) => {
                left.push(f);
                Self::And(left)
            }
            (f, Self::And(right)) => {
                let mut parts = Vec::with_capacity(right.len() + 1);
                parts.push(f);
                parts.extend(right);
                Self::And(parts)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// OR two fragments, flattening nested ORs
    ///
    /// `Always` absorbs: anything OR always-true is always-true.
    pub fn or(self, other: Fragment) -> Fragment {
        match (self, other) {
            (Self::Always, _) | (_, Self::Always) => Self::Always,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), f) => {
                left.push(f);
                Self::Or(left)
            }
            (f, Self::Or(right)) => {
                let mut parts = Vec::with_capacity(right.len() + 1);
                parts.push(f);
                parts.extend(right);
                Self::Or(parts)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }

    /// AND a sequence of fragments; an empty sequence yields `Always`
    pub fn all<I: IntoIterator<Item = Fragment>>(parts: I) -> Fragment {
        parts.into_iter().fold(Self::Always, Self::and)
    }

    /// OR a sequence of fragments as one group
    ///
    /// An empty group applies no filtering and yields `Always`.
    pub fn any<I: IntoIterator<Item = Fragment>>(parts: I) -> Fragment {
        let mut parts = parts.into_iter();
        match parts.next() {
            None => Self::Always,
            Some(first) => parts.fold(first, Self::or),
        }
    }

    /// Lower to a SQL boolean expression with `?` placeholders
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        match self {
            Self::Always => "1=1".to_string(),
            Self::And(parts) => join_group(parts, " AND ", "1=1", params),
            Self::Or(parts) => join_group(parts, " OR ", "1=0", params),
            Self::Compare { column, comparison } => comparison_sql(column, comparison, params),
        }
    }
}

fn join_group(
    parts: &[Fragment],
    separator: &str,
    empty: &str,
    params: &mut SqlParams,
) -> String {
    match parts {
        [] => empty.to_string(),
        [single] => single.to_sql(params),
        _ => {
            let clauses: Vec<String> = parts.iter().map(|p| p.to_sql(params)).collect();
            format!("({})", clauses.join(separator))
        }
    }
}

fn comparison_sql(column: &str, comparison: &Comparison, params: &mut SqlParams) -> String {
    let binary = |op: &str, value: &SqlValue, params: &mut SqlParams| {
        params.values.push(value.clone());
        format!("{} {} ?", column, op)
    };

    let list = |op: &str, values: &[SqlValue], params: &mut SqlParams| {
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        params.values.extend(values.iter().cloned());
        format!("{} {} ({})", column, op, placeholders.join(", "))
    };

    match comparison {
        Comparison::Eq(v) => binary("=", v, params),
        Comparison::Ne(v) => binary("<>", v, params),
        Comparison::Gt(v) => binary(">", v, params),
        Comparison::Lt(v) => binary("<", v, params),
        Comparison::In(values) if values.is_empty() => "1=0".to_string(),
        Comparison::In(values) => list("IN", values, params),
        Comparison::NotIn(values) if values.is_empty() => "1=1".to_string(),
        Comparison::NotIn(values) => list("NOT IN", values, params),
        Comparison::Contains(text) => {
            params.values.push(SqlValue::Text(contains_pattern(text)));
            format!("LOWER({}) LIKE ? ESCAPE '\\'", column)
        }
        Comparison::IsNull => format!("{} IS NULL", column),
        Comparison::IsNotNull => format!("{} IS NOT NULL", column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(column: &'static str, v: i64) -> Fragment {
        Fragment::compare(column, Comparison::Eq(v.into()))
    }

    #[test]
    fn always_is_and_identity() {
        let f = eq("id", 1);
        assert_eq!(Fragment::Always.and(f.clone()), f);
        assert_eq!(f.clone().and(Fragment::Always), f);
        assert_eq!(Fragment::all(Vec::new()), Fragment::Always);
    }

    #[test]
    fn empty_or_group_is_always() {
        assert_eq!(Fragment::any(Vec::new()), Fragment::Always);
        assert_eq!(Fragment::any(vec![eq("id", 1)]), eq("id", 1));
    }

    #[test]
    fn and_flattens() {
        let f = eq("a", 1).and(eq("b", 2)).and(eq("c", 3));
        assert_eq!(f, Fragment::And(vec![eq("a", 1), eq("b", 2), eq("c", 3)]));
    }

    #[test]
    fn or_flattens_and_absorbs_always() {
        let f = Fragment::any(vec![eq("a", 1), eq("b", 2), eq("c", 3)]);
        assert_eq!(f, Fragment::Or(vec![eq("a", 1), eq("b", 2), eq("c", 3)]));
        assert_eq!(eq("a", 1).or(Fragment::Always), Fragment::Always);
    }

    #[test]
    fn always_lowers_to_true() {
        let mut params = SqlParams::default();
        assert_eq!(Fragment::Always.to_sql(&mut params), "1=1");
        assert!(params.values.is_empty());
    }

    #[test]
    fn binary_comparisons() {
        let cases = [
            (Comparison::Eq(SqlValue::Integer(5)), "id = ?"),
            (Comparison::Ne(SqlValue::Integer(5)), "id <> ?"),
            (Comparison::Gt(SqlValue::Integer(5)), "id > ?"),
            (Comparison::Lt(SqlValue::Integer(5)), "id < ?"),
        ];
        for (comparison, expected) in cases {
            let mut params = SqlParams::default();
            let sql = Fragment::compare("id", comparison).to_sql(&mut params);
            assert_eq!(sql, expected);
            assert_eq!(params.values, vec![SqlValue::Integer(5)]);
        }
    }

    #[test]
    fn in_list_placeholders() {
        let mut params = SqlParams::default();
        let f = Fragment::compare(
            "role",
            Comparison::In(vec!["ADMIN".into(), "MANAGER".into()]),
        );
        assert_eq!(f.to_sql(&mut params), "role IN (?, ?)");
        assert_eq!(
            params.values,
            vec![SqlValue::from("ADMIN"), SqlValue::from("MANAGER")]
        );
    }

    #[test]
    fn contains_escapes_and_lowercases() {
        let mut params = SqlParams::default();
        let f = Fragment::compare("username", Comparison::Contains("Ab_1%".to_string()));
        assert_eq!(f.to_sql(&mut params), r"LOWER(username) LIKE ? ESCAPE '\'");
        assert_eq!(params.values, vec![SqlValue::from(r"%ab\_1\%%")]);
    }

    #[test]
    fn null_checks_bind_nothing() {
        let mut params = SqlParams::default();
        let sql = Fragment::compare("department_id", Comparison::IsNull).to_sql(&mut params);
        assert_eq!(sql, "department_id IS NULL");
        let sql = Fragment::compare("department_id", Comparison::IsNotNull).to_sql(&mut params);
        assert_eq!(sql, "department_id IS NOT NULL");
        assert!(params.values.is_empty());
    }

    #[test]
    fn nested_groups_keep_param_order() {
        let search = Fragment::any(vec![
            Fragment::compare("username", Comparison::Contains("an".into())),
            eq("id", 7),
        ]);
        let f = eq("department_id", 2).and(search);
        let mut params = SqlParams::default();
        let sql = f.to_sql(&mut params);

        assert_eq!(
            sql,
            r"(department_id = ? AND (LOWER(username) LIKE ? ESCAPE '\' OR id = ?))"
        );
        assert_eq!(
            params.values,
            vec![
                SqlValue::Integer(2),
                SqlValue::from("%an%"),
                SqlValue::Integer(7)
            ]
        );
    }

    #[test]
    fn empty_lists_lower_to_constants() {
        let mut params = SqlParams::default();
        assert_eq!(
            Fragment::compare("id", Comparison::In(vec![])).to_sql(&mut params),
            "1=0"
        );
        assert_eq!(
            Fragment::compare("id", Comparison::NotIn(vec![])).to_sql(&mut params),
            "1=1"
        );
        assert!(params.values.is_empty());
    }

    #[test]
    fn empty_groups_lower_to_identities() {
        let mut params = SqlParams::default();
        assert_eq!(Fragment::And(vec![]).to_sql(&mut params), "1=1");
        assert_eq!(Fragment::Or(vec![]).to_sql(&mut params), "1=0");
    }
}
