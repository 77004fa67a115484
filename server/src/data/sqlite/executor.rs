//! Query executor
//!
//! Lowers a [`Fragment`] once and runs it against an entity table. Paged
//! reads issue one `COUNT(*)` and, unless the requested window lies past the
//! last match, one `LIMIT/OFFSET` select.

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Arguments, Encode, Sqlite, SqlitePool, Type};

use super::error::SqliteError;
use crate::data::filters::{EntityMeta, Fragment, Page, PageRequest, SqlParams, SqlValue};

/// Run `fragment` against `entity` and return one page plus the total count
pub async fn fetch_page<R>(
    pool: &SqlitePool,
    entity: &EntityMeta,
    fragment: &Fragment,
    request: &PageRequest,
) -> Result<Page<R>, SqliteError>
where
    R: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut params = SqlParams::default();
    let where_clause = fragment.to_sql(&mut params);

    let count_sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {}",
        entity.table, where_clause
    );
    tracing::trace!(sql = %count_sql, params = ?params.values, "Count query");

    let total = sqlx::query_scalar_with::<_, i64, _>(&count_sql, arguments(&params.values)?)
        .fetch_one(pool)
        .await?
        .max(0) as u64;

    let offset = request.offset();
    if offset as u64 >= total {
        tracing::trace!(total, offset, "Page window past last match, skipping select");
        return Ok(Page::empty(request, total));
    }

    let select_sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {} LIMIT ? OFFSET ?",
        entity.select_columns(),
        entity.table,
        where_clause,
        request.order_by(entity)
    );
    tracing::trace!(sql = %select_sql, params = ?params.values, "Page query");

    let mut args = arguments(&params.values)?;
    add(&mut args, i64::from(request.size))?;
    add(&mut args, offset)?;
    let content = sqlx::query_as_with::<_, R, _>(&select_sql, args)
        .fetch_all(pool)
        .await?;

    Ok(Page {
        content,
        total_elements: total,
        page: request.page,
        size: request.size,
    })
}

/// Run `fragment` against `entity` without paging, ordered by primary key
pub async fn fetch_all<R>(
    pool: &SqlitePool,
    entity: &EntityMeta,
    fragment: &Fragment,
) -> Result<Vec<R>, SqliteError>
where
    R: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut params = SqlParams::default();
    let sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {} ASC",
        entity.select_columns(),
        entity.table,
        fragment.to_sql(&mut params),
        entity.id().column
    );
    tracing::trace!(sql = %sql, params = ?params.values, "Unpaged query");

    let args = arguments(&params.values)?;
    Ok(sqlx::query_as_with::<_, R, _>(&sql, args)
        .fetch_all(pool)
        .await?)
}

/// First row matching `fragment`, if any
pub async fn fetch_optional<R>(
    pool: &SqlitePool,
    entity: &EntityMeta,
    fragment: &Fragment,
) -> Result<Option<R>, SqliteError>
where
    R: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut params = SqlParams::default();
    let sql = format!(
        "SELECT {} FROM {} WHERE {} LIMIT 1",
        entity.select_columns(),
        entity.table,
        fragment.to_sql(&mut params)
    );
    tracing::trace!(sql = %sql, params = ?params.values, "Single-row query");

    let args = arguments(&params.values)?;
    Ok(sqlx::query_as_with::<_, R, _>(&sql, args)
        .fetch_optional(pool)
        .await?)
}

/// Bind values in placeholder order; text is borrowed, not copied
fn arguments(values: &[SqlValue]) -> Result<SqliteArguments<'_>, SqliteError> {
    let mut args = SqliteArguments::default();
    for value in values {
        match value {
            SqlValue::Integer(i) => add(&mut args, *i)?,
            SqlValue::Text(s) => add(&mut args, s.as_str())?,
            SqlValue::Bool(b) => add(&mut args, *b)?,
        }
    }
    Ok(args)
}

fn add<'q, T>(args: &mut SqliteArguments<'q>, value: T) -> Result<(), SqliteError>
where
    T: 'q + Encode<'q, Sqlite> + Type<Sqlite>,
{
    args.add(value).map_err(sqlx::Error::Encode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_keep_every_value() {
        let values = vec![
            SqlValue::Integer(7),
            SqlValue::from("%ann%"),
            SqlValue::Bool(false),
        ];
        let args = arguments(&values).unwrap();
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_arguments_empty() {
        assert_eq!(arguments(&[]).unwrap().len(), 0);
    }
}
