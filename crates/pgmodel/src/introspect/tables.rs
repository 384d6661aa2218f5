use pgmodel_schema::{Oid, RelationKind, SchemaRef, TableRef};

use crate::{Connection, ConnectionExt, Error, KindFilter, Result};

/// Build the table query.
///
/// `$1` is always the schema id set. With a name filter, `$2` holds the names
/// and the kind filter is ignored: both tables and views match.
pub(crate) fn tables_query(by_name: bool, kind: KindFilter) -> String {
    let kinds = if by_name {
        KindFilter::Both.relation_kinds()
    } else {
        kind.relation_kinds()
    };
    let relkinds = kinds
        .iter()
        .map(|k| format!("'{}'", k.relkind()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = String::from(
        "SELECT c.oid AS id, c.relnamespace AS schema_id, c.relname::text AS name, \
         c.relkind::text AS kind, obj_description(c.oid, 'pg_class') AS comment\n\
         FROM pg_catalog.pg_class c\n\
         WHERE c.relnamespace = ANY($1::oid[])",
    );
    sql.push_str(&format!("\n  AND c.relkind IN ({relkinds})"));
    if by_name {
        sql.push_str("\n  AND c.relname::text = ANY($2::text[])");
    }
    sql.push_str("\nORDER BY c.relkind, c.relnamespace, c.oid");
    sql
}

/// Resolve the tables and views living in `schemas`.
///
/// An explicit `names` list takes precedence over `kind`.
pub async fn resolve_tables<C: Connection>(
    conn: &C,
    schemas: &[SchemaRef],
    names: &[String],
    kind: KindFilter,
) -> Result<Vec<TableRef>> {
    if schemas.is_empty() {
        return Ok(Vec::new());
    }

    let schema_ids: Vec<Oid> = schemas.iter().map(|s| s.id).collect();
    let by_name = !names.is_empty();
    let sql = tables_query(by_name, kind);

    let rows = if by_name {
        conn.traced().query(&sql, &[&schema_ids, &names]).await?
    } else {
        conn.traced().query(&sql, &[&schema_ids]).await?
    };

    let tables = rows
        .iter()
        .map(|row| -> Result<TableRef> {
            let relkind: String = row.try_get("kind")?;
            let Some(kind) = RelationKind::from_relkind(&relkind) else {
                let message = format!("unexpected relation kind '{relkind}'");
                return Err(Error::Catalog(message));
            };
            Ok(TableRef {
                id: row.try_get("id")?,
                schema_id: row.try_get("schema_id")?,
                name: row.try_get("name")?,
                kind,
                comment: row.try_get("comment")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(?kind, by_name, found = tables.len(), "resolved tables");
    Ok(tables)
}
