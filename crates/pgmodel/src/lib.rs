//! Postgres catalog introspection for generating Rust model structs.
//!
//! A run resolves, in order:
//! - the schemas to look at (an explicit list, or every user schema)
//! - the tables and views in those schemas, filtered by name or kind
//! - the live columns of those tables, in one query
//!
//! and folds the column rows into [`TableEntity`] values, one per table, in
//! catalog order. Mapping column types to Rust lives in `pgmodel-schema`,
//! rendering in `pgmodel-rustgen`.
//!
//! ```ignore
//! let client = pgmodel::connect(&"host=localhost user=postgres".parse()?).await?;
//! let scope = QueryScope::from_lists("public", "", "");
//! let tables = pgmodel::introspect(&client, &scope).await?;
//! ```
//!
//! There is no retry and no partial result: either every stage succeeds or
//! the run returns an error.

mod aggregate;
mod error;
pub mod introspect;
mod scope;
mod session;
mod traced;

pub use aggregate::{CatalogRow, aggregate};
pub use error::Error;
pub use introspect::{introspect, join_rows, resolve_columns, resolve_schemas, resolve_tables};
pub use scope::{KindFilter, QueryScope, split_list};
pub use session::{DEFAULT_CONNECT_TIMEOUT, connect};
pub use traced::{Connection, ConnectionExt, TracedConn};

pub use pgmodel_schema::{
    ColumnDescriptor, Oid, RelationKind, SchemaRef, TableEntity, TableRef, TypeDescriptor,
    map_column,
};

/// Result type for pgmodel operations.
pub type Result<T> = std::result::Result<T, Error>;
