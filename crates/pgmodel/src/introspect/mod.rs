//! Catalog resolution: schemas, then tables, then columns.
//!
//! Each stage runs one query and hands its ids to the next one. The stages
//! never run concurrently and share nothing but what they return.

mod columns;
mod schemas;
mod tables;

use std::collections::HashMap;

use pgmodel_schema::{ColumnDescriptor, Oid, SchemaRef, TableEntity, TableRef};

use crate::{CatalogRow, Connection, Error, QueryScope, Result, aggregate};

pub use columns::resolve_columns;
pub use schemas::resolve_schemas;
pub use tables::resolve_tables;

/// Run a full resolution pass and return one entity per table, in catalog order.
///
/// Tables without any live column produce no entity.
pub async fn introspect<C: Connection>(conn: &C, scope: &QueryScope) -> Result<Vec<TableEntity>> {
    let schemas = resolve_schemas(conn, &scope.schemas).await?;
    let tables = resolve_tables(conn, &schemas, &scope.tables, scope.kind).await?;
    let columns = resolve_columns(conn, &tables).await?;

    let column_count = columns.len();
    let rows = join_rows(&schemas, &tables, columns)?;
    let entities = aggregate(rows);

    tracing::info!(
        schemas = schemas.len(),
        tables = entities.len(),
        columns = column_count,
        "introspected catalog"
    );

    Ok(entities)
}

/// Attach each column to its table and schema.
///
/// The column order is kept as is. A column pointing at a table that was not
/// resolved, or a table pointing at an unknown schema, is an error.
pub fn join_rows<'a>(
    schemas: &'a [SchemaRef],
    tables: &'a [TableRef],
    columns: Vec<ColumnDescriptor>,
) -> Result<Vec<CatalogRow<'a>>> {
    let schemas_by_id: HashMap<Oid, &SchemaRef> = schemas.iter().map(|s| (s.id, s)).collect();
    let tables_by_id: HashMap<Oid, &TableRef> = tables.iter().map(|t| (t.id, t)).collect();

    columns
        .into_iter()
        .map(|column| -> Result<CatalogRow<'a>> {
            let table = *tables_by_id.get(&column.table_id).ok_or_else(|| {
                Error::Catalog(format!(
                    "column '{}' belongs to unresolved table oid {}",
                    column.name, column.table_id
                ))
            })?;
            let schema = *schemas_by_id.get(&table.schema_id).ok_or_else(|| {
                Error::Catalog(format!(
                    "table '{}' belongs to unresolved schema oid {}",
                    table.name, table.schema_id
                ))
            })?;
            Ok(CatalogRow {
                schema,
                table,
                column,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::columns::{DROPPED_COLUMN_TYPE, columns_query, is_live_column_type};
    use super::schemas::{NAMED_SCHEMAS_SQL, USER_SCHEMAS_SQL, schemas_query};
    use super::tables::tables_query;
    use super::*;
    use crate::KindFilter;
    use pgmodel_schema::RelationKind;

    #[test]
    fn test_user_schemas_sql_excludes_internal_schemas() {
        assert!(USER_SCHEMAS_SQL.contains("nspname !~ '^pg_'"));
        assert!(USER_SCHEMAS_SQL.contains("nspname <> 'information_schema'"));
        assert!(!USER_SCHEMAS_SQL.contains("$1"));
    }

    #[test]
    fn test_named_schemas_sql_is_membership_only() {
        assert!(NAMED_SCHEMAS_SQL.contains("= ANY($1::text[])"));
        assert!(!NAMED_SCHEMAS_SQL.contains("^pg_"));
    }

    #[test]
    fn test_schemas_query_selection() {
        assert_eq!(schemas_query(false), USER_SCHEMAS_SQL);
        assert_eq!(schemas_query(true), NAMED_SCHEMAS_SQL);
    }

    #[test]
    fn test_tables_query_kind_filter() {
        let sql = tables_query(false, KindFilter::Tables);
        assert!(sql.contains("c.relkind IN ('r')"));
        assert!(!sql.contains("$2"));

        let sql = tables_query(false, KindFilter::Views);
        assert!(sql.contains("c.relkind IN ('v')"));

        let sql = tables_query(false, KindFilter::Both);
        assert!(sql.contains("c.relkind IN ('r', 'v')"));
    }

    #[test]
    fn test_tables_query_name_filter_overrides_kind() {
        for kind in [KindFilter::Tables, KindFilter::Views, KindFilter::Both] {
            let sql = tables_query(true, kind);
            assert!(sql.contains("c.relkind IN ('r', 'v')"), "{sql}");
            assert!(sql.contains("c.relname::text = ANY($2::text[])"));
        }
    }

    #[test]
    fn test_tables_query_is_scoped_to_schema_ids() {
        let sql = tables_query(false, KindFilter::Both);
        assert!(sql.contains("c.relnamespace = ANY($1::oid[])"));
        assert!(sql.contains("obj_description(c.oid, 'pg_class')"));
    }

    #[test]
    fn test_columns_query_single_query_for_all_tables() {
        let sql = columns_query();
        assert!(sql.contains("a.attrelid = ANY($1::oid[])"));
        assert!(sql.contains("a.attnum > 0"));
        assert!(sql.contains(&format!(
            "format_type(a.atttypid, a.atttypmod) <> '{DROPPED_COLUMN_TYPE}'"
        )));
    }

    #[test]
    fn test_columns_query_order_contract() {
        let sql = columns_query();
        let order = "ORDER BY c.relkind ASC, c.relnamespace ASC, c.oid ASC, a.attnum ASC";
        assert!(sql.ends_with(order), "{sql}");
    }

    #[test]
    fn test_live_column_type() {
        assert!(is_live_column_type("integer"));
        assert!(is_live_column_type("text[]"));
        assert!(!is_live_column_type("-"));
    }

    fn schema(id: Oid, name: &str) -> SchemaRef {
        SchemaRef {
            id,
            name: name.to_string(),
        }
    }

    fn table(id: Oid, schema_id: Oid, name: &str) -> TableRef {
        TableRef {
            id,
            schema_id,
            name: name.to_string(),
            kind: RelationKind::Table,
            comment: None,
        }
    }

    fn column(table_id: Oid, name: &str, ordinal_position: i16) -> ColumnDescriptor {
        ColumnDescriptor {
            table_id,
            name: name.to_string(),
            ordinal_position,
            sql_type: "text".to_string(),
            array_dims: 0,
            not_null: true,
            comment: None,
        }
    }

    #[test]
    fn test_join_rows_links_schema_and_table() {
        let schemas = vec![schema(2200, "public"), schema(16390, "billing")];
        let tables = vec![table(16400, 2200, "user"), table(16500, 16390, "invoice")];
        let columns = vec![column(16400, "id", 1), column(16500, "total", 1)];

        let rows = join_rows(&schemas, &tables, columns).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].schema.name, "public");
        assert_eq!(rows[0].table.name, "user");
        assert_eq!(rows[1].schema.name, "billing");
        assert_eq!(rows[1].column.name, "total");
    }

    #[test]
    fn test_join_rows_rejects_unknown_table() {
        let schemas = vec![schema(2200, "public")];
        let tables = vec![table(16400, 2200, "user")];
        let columns = vec![column(99999, "ghost", 1)];

        let err = join_rows(&schemas, &tables, columns).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_join_rows_rejects_unknown_schema() {
        let schemas = vec![schema(2200, "public")];
        let tables = vec![table(16400, 11, "pg_class")];
        let columns = vec![column(16400, "oid", 1)];

        let err = join_rows(&schemas, &tables, columns).unwrap_err();
        assert!(err.to_string().contains("unresolved schema"));
    }
}
