use pgmodel_schema::{ColumnDescriptor, Oid, TableRef};

use crate::{Connection, ConnectionExt, Result};

/// What `format_type` reports for a dropped column's type.
///
/// Dropped columns stay in `pg_attribute` with `atttypid = 0`, which
/// `format_type` renders as a lone dash.
pub(crate) const DROPPED_COLUMN_TYPE: &str = "-";

/// Whether a `format_type` result belongs to a live column.
pub(crate) fn is_live_column_type(sql_type: &str) -> bool {
    sql_type != DROPPED_COLUMN_TYPE
}

/// Build the column query.
///
/// One query covers the whole table id set in `$1`. The ORDER BY is what
/// gives the aggregated output its order; nothing downstream sorts.
pub(crate) fn columns_query() -> String {
    format!(
        "SELECT a.attrelid AS table_id, a.attname::text AS name, a.attnum AS ordinal_position, \
         format_type(a.atttypid, a.atttypmod) AS sql_type, a.attndims::int4 AS array_dims, \
         a.attnotnull AS not_null, col_description(a.attrelid, a.attnum) AS comment\n\
         FROM pg_catalog.pg_attribute a\n\
         JOIN pg_catalog.pg_class c ON c.oid = a.attrelid\n\
         WHERE a.attrelid = ANY($1::oid[])\n  \
         AND a.attnum > 0\n  \
         AND format_type(a.atttypid, a.atttypmod) <> '{DROPPED_COLUMN_TYPE}'\n\
         ORDER BY c.relkind ASC, c.relnamespace ASC, c.oid ASC, a.attnum ASC"
    )
}

/// Resolve the live, user-visible columns of `tables`.
///
/// System columns (non-positive `attnum`) and dropped columns are skipped.
pub async fn resolve_columns<C: Connection>(
    conn: &C,
    tables: &[TableRef],
) -> Result<Vec<ColumnDescriptor>> {
    if tables.is_empty() {
        return Ok(Vec::new());
    }

    let table_ids: Vec<Oid> = tables.iter().map(|t| t.id).collect();
    let rows = conn.traced().query(&columns_query(), &[&table_ids]).await?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let sql_type: String = row.try_get("sql_type")?;
        if !is_live_column_type(&sql_type) {
            continue;
        }
        let array_dims: i32 = row.try_get("array_dims")?;
        columns.push(ColumnDescriptor {
            table_id: row.try_get("table_id")?,
            name: row.try_get("name")?,
            ordinal_position: row.try_get("ordinal_position")?,
            sql_type,
            array_dims: array_dims.max(0) as u32,
            not_null: row.try_get("not_null")?,
            comment: row.try_get("comment")?,
        });
    }

    tracing::debug!(
        tables = tables.len(),
        found = columns.len(),
        "resolved columns"
    );
    Ok(columns)
}
