//! Catalog data model for pgmodel.
//!
//! This crate contains the types shared between `pgmodel` (catalog
//! introspection) and `pgmodel-rustgen` (struct rendering), plus the
//! SQL-to-Rust type mapper. Nothing in here touches the database.

use std::fmt;

mod typemap;

pub use typemap::{
    MappingRule, TypeDescriptor, canonical_type_name, map_column, rule_for, strip_array_markers,
};

/// Postgres object identifier, as stored in `pg_namespace.oid` / `pg_class.oid`.
pub type Oid = u32;

/// A schema (namespace) picked by the schema filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRef {
    /// `pg_namespace.oid`
    pub id: Oid,
    /// `pg_namespace.nspname`
    pub name: String,
}

/// Kind of relation pgmodel knows how to describe.
///
/// Variants are declared in `relkind` order (`'r'` < `'v'`) so that the
/// derived `Ord` agrees with the catalog ordering used by the column query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationKind {
    /// Ordinary table (`relkind = 'r'`)
    Table,
    /// View (`relkind = 'v'`)
    View,
}

impl RelationKind {
    /// Decode a `pg_class.relkind` value.
    ///
    /// Returns `None` for materialized views, indexes, sequences and every
    /// other relation kind.
    pub fn from_relkind(relkind: &str) -> Option<Self> {
        match relkind {
            "r" => Some(RelationKind::Table),
            "v" => Some(RelationKind::View),
            _ => None,
        }
    }

    /// The `pg_class.relkind` code for this kind.
    pub fn relkind(&self) -> &'static str {
        match self {
            RelationKind::Table => "r",
            RelationKind::View => "v",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Table => write!(f, "table"),
            RelationKind::View => write!(f, "view"),
        }
    }
}

/// A table or view found in one of the resolved schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// `pg_class.oid`
    pub id: Oid,
    /// Owning schema, by id only
    pub schema_id: Oid,
    /// `pg_class.relname`
    pub name: String,
    /// Table or view
    pub kind: RelationKind,
    /// `COMMENT ON TABLE` / `COMMENT ON VIEW` text
    pub comment: Option<String>,
}

/// A live, user-visible column of a resolved table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// The table this column belongs to (`pg_attribute.attrelid`)
    pub table_id: Oid,
    /// `pg_attribute.attname`
    pub name: String,
    /// 1-based position within the table (`pg_attribute.attnum`)
    pub ordinal_position: i16,
    /// `format_type(atttypid, atttypmod)`, e.g. `bigint`, `text[]`, `numeric(10,2)`
    pub sql_type: String,
    /// Declared array dimensions, 0 for scalars
    pub array_dims: u32,
    /// `pg_attribute.attnotnull`
    pub not_null: bool,
    /// `COMMENT ON COLUMN` text
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    /// Whether the column has an array type.
    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    /// Map this column to a Rust type.
    pub fn type_descriptor(&self) -> TypeDescriptor {
        map_column(self)
    }
}

/// A table together with its columns, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntity {
    /// Name of the owning schema
    pub schema_name: String,
    /// Table or view name
    pub name: String,
    /// Table or view
    pub kind: RelationKind,
    /// Table comment
    pub comment: Option<String>,
    /// Columns in catalog ordinal order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableEntity {
    /// Schema-qualified name, e.g. `public.user`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema_name, self.name)
    }
}
