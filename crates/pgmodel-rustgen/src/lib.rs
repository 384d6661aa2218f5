//! Rust model structs from introspected tables, using the `codegen` crate.
//!
//! Each [`TableEntity`] becomes one `pub struct` with one `pub` field per
//! column, in the order the entities and columns come in:
//!
//! ```text
//! /// registered accounts
//! #[derive(Debug, Clone)]
//! pub struct Users {
//!     /// `type:bigint`
//!     pub id: i64,
//!     /// login address
//!     /// `type:text`
//!     pub email: String,
//! }
//!
//! impl Users {
//!     pub const TABLE: &'static str = "app.users";
//! }
//! ```
//!
//! Columns without a safe mapping are emitted with a `compile_error!` type so
//! the output does not build until someone picks a type, and are listed in
//! [`GeneratedCode::manual_review`].

mod naming;

use std::collections::HashSet;

use codegen::{Module, Scope, Struct};
use pgmodel_schema::TableEntity;

pub use naming::{field_ident, to_pascal_case};

/// Rendering knobs.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Wrap everything in `pub mod <module> { … }`.
    pub module: Option<String>,
    /// Database name, noted in the header.
    pub database: Option<String>,
}

/// Generated Rust source.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    pub code: String,
    /// Columns emitted with a placeholder type.
    pub manual_review: Vec<ManualReview>,
}

/// A column the mapper could not type on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualReview {
    /// `schema.table.column`
    pub column: String,
    pub sql_type: String,
}

/// Render `tables` as Rust source.
pub fn generate(tables: &[TableEntity], options: &RenderOptions) -> GeneratedCode {
    let mut scope = Scope::new();

    // one raw item: separate items get blank lines between them
    let mut header = String::from("// Generated by pgmodel. Do not edit.");
    if let Some(database) = &options.database {
        header.push_str(&format!("\n// Source database: {database}"));
    }
    scope.raw(&header);

    let mut module = options.module.as_deref().map(|name| {
        let mut module = Module::new(&field_ident(name));
        module.vis("pub");
        module
    });
    let body = match module.as_mut() {
        Some(module) => module.scope(),
        None => &mut scope,
    };

    let mut manual_review = Vec::new();
    let mut struct_names = HashSet::new();

    for table in tables {
        let struct_name = unique_struct_name(table, &mut struct_names);
        generate_table_struct(table, &struct_name, body, &mut manual_review);
    }

    if let Some(module) = module {
        scope.push_module(module);
    }

    for review in &manual_review {
        tracing::warn!(
            column = %review.column,
            sql_type = %review.sql_type,
            "column needs a manually chosen Rust type"
        );
    }

    GeneratedCode {
        code: scope.to_string(),
        manual_review,
    }
}

/// PascalCase of the table name; a name already taken by an earlier table
/// (same table name in another schema) gets the schema name in front.
fn unique_struct_name(table: &TableEntity, taken: &mut HashSet<String>) -> String {
    let plain = to_pascal_case(&table.name);
    if taken.insert(plain.clone()) {
        return plain;
    }

    let qualified = to_pascal_case(&format!("{}_{}", table.schema_name, table.name));
    let mut candidate = qualified.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{qualified}{n}");
        n += 1;
    }
    candidate
}

/// Sanitized column name; on a clash (`first name` and `first_name` both
/// become `first_name`) the ordinal is appended, then a counter.
fn unique_field_ident(column: &str, ordinal: i16, taken: &mut HashSet<String>) -> String {
    let ident = field_ident(column);
    if taken.insert(ident.clone()) {
        return ident;
    }

    let numbered = format!("{ident}_{ordinal}");
    let mut candidate = numbered.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{numbered}_{n}");
        n += 1;
    }
    candidate
}

fn generate_table_struct(
    table: &TableEntity,
    struct_name: &str,
    scope: &mut Scope,
    manual_review: &mut Vec<ManualReview>,
) {
    let qualified = table.qualified_name();

    let mut st = Struct::new(struct_name);
    st.vis("pub");
    let doc = match &table.comment {
        Some(comment) => comment.clone(),
        None => format!("Row of {} `{}`.", table.kind, qualified),
    };
    st.doc(&doc);
    st.derive("Debug");
    st.derive("Clone");

    let mut field_names = HashSet::new();
    for column in &table.columns {
        let desc = column.type_descriptor();
        if desc.needs_manual_review {
            manual_review.push(ManualReview {
                column: format!("{qualified}.{}", column.name),
                sql_type: column.sql_type.clone(),
            });
        }

        let ident = unique_field_ident(&column.name, column.ordinal_position, &mut field_names);

        let mut docs = String::new();
        if let Some(comment) = &column.comment {
            for line in comment.lines() {
                docs.push_str(&format!("/// {line}\n"));
            }
        }
        docs.push_str(&format!("/// `{}`\n", desc.storage_tag));

        st.field(format!("{docs}pub {ident}"), &desc.language_type);
    }

    scope.push_struct(st);
    scope.raw(&format!(
        "impl {struct_name} {{\n    pub const TABLE: &'static str = {qualified:?};\n}}"
    ));
}
