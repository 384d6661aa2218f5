use pgmodel_schema::SchemaRef;

use crate::{Connection, ConnectionExt, Result};

/// Every schema that is not internal to postgres.
pub(crate) const USER_SCHEMAS_SQL: &str = "\
SELECT n.oid AS id, n.nspname::text AS name
FROM pg_catalog.pg_namespace n
WHERE n.nspname !~ '^pg_' AND n.nspname <> 'information_schema'
ORDER BY n.oid";

/// Exactly the schemas named in `$1`.
pub(crate) const NAMED_SCHEMAS_SQL: &str = "\
SELECT n.oid AS id, n.nspname::text AS name
FROM pg_catalog.pg_namespace n
WHERE n.nspname::text = ANY($1::text[])
ORDER BY n.oid";

/// Pick the schema query: every user schema, or exactly the named ones.
pub(crate) fn schemas_query(by_name: bool) -> &'static str {
    if by_name {
        NAMED_SCHEMAS_SQL
    } else {
        USER_SCHEMAS_SQL
    }
}

/// Resolve the schemas to introspect.
///
/// With an empty `names` list every user schema is returned. Otherwise only
/// the named schemas are; names that do not exist are silently skipped.
pub async fn resolve_schemas<C: Connection>(conn: &C, names: &[String]) -> Result<Vec<SchemaRef>> {
    let sql = schemas_query(!names.is_empty());
    let rows = if names.is_empty() {
        conn.traced().query(sql, &[]).await?
    } else {
        conn.traced().query(sql, &[&names]).await?
    };

    let schemas = rows
        .iter()
        .map(|row| -> Result<SchemaRef> {
            Ok(SchemaRef {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        requested = names.len(),
        found = schemas.len(),
        "resolved schemas"
    );
    Ok(schemas)
}
