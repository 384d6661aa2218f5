//! Folding joined catalog rows into table entities.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use pgmodel_schema::{ColumnDescriptor, Oid, SchemaRef, TableEntity, TableRef};

/// One column together with the table and schema it belongs to.
#[derive(Debug, Clone)]
pub struct CatalogRow<'a> {
    pub schema: &'a SchemaRef,
    pub table: &'a TableRef,
    pub column: ColumnDescriptor,
}

/// Group rows by table.
///
/// Tables come out in the order their first row appears, columns in row
/// order. Nothing is sorted here: the column query's ORDER BY decides both.
/// A table seen again later in the stream gets the column appended to its
/// existing entity rather than a second entity.
pub fn aggregate<'a>(rows: impl IntoIterator<Item = CatalogRow<'a>>) -> Vec<TableEntity> {
    // table id -> position in `entities`
    let mut index: HashMap<Oid, usize> = HashMap::new();
    let mut entities: Vec<TableEntity> = Vec::new();

    for row in rows {
        match index.entry(row.table.id) {
            Entry::Occupied(slot) => {
                entities[*slot.get()].columns.push(row.column);
            }
            Entry::Vacant(slot) => {
                slot.insert(entities.len());
                entities.push(TableEntity {
                    schema_name: row.schema.name.clone(),
                    name: row.table.name.clone(),
                    kind: row.table.kind,
                    comment: row.table.comment.clone(),
                    columns: vec![row.column],
                });
            }
        }
    }

    entities
}
