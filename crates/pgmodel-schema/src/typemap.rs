//! SQL type to Rust type mapping.
//!
//! Only types with an obvious Rust counterpart are mapped. Everything else is
//! flagged for manual review instead of being guessed.
//!
//! Array columns lose their declared bounds: `text[3][2]` and `text[][]` both
//! become `Vec<Vec<String>>`. Only the dimension count survives.

use crate::ColumnDescriptor;

/// The result of mapping a column to Rust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Rust type to emit, e.g. `Option<i64>` or `Vec<String>`.
    ///
    /// When `needs_manual_review` is set this is a `compile_error!` placeholder,
    /// never an empty string.
    pub language_type: String,
    /// Catalog SQL type for renderers: `type:<sql type>`, plus `,array` for arrays.
    pub storage_tag: String,
    /// No safe automatic mapping exists for this column.
    pub needs_manual_review: bool,
}

/// How a canonical SQL type name maps to Rust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingRule {
    /// Maps to the given Rust type.
    Rust(&'static str),
    /// `json`/`jsonb`: a document map, raw bytes and a raw message are all
    /// reasonable, so the caller has to pick.
    Json,
}

/// Canonical SQL type name to mapping rule.
///
/// Keys are `format_type` spellings with any `(…)` modifier removed.
static TYPE_RULES: &[(&str, MappingRule)] = &[
    ("bigint", MappingRule::Rust("i64")),
    ("integer", MappingRule::Rust("i32")),
    ("smallint", MappingRule::Rust("i16")),
    ("decimal", MappingRule::Rust("f64")),
    ("numeric", MappingRule::Rust("f64")),
    ("double precision", MappingRule::Rust("f64")),
    ("real", MappingRule::Rust("f32")),
    ("text", MappingRule::Rust("String")),
    ("boolean", MappingRule::Rust("bool")),
    ("bytea", MappingRule::Rust("Vec<u8>")),
    ("inet", MappingRule::Rust("std::net::IpAddr")),
    (
        "timestamp with time zone",
        MappingRule::Rust("jiff::Timestamp"),
    ),
    ("timestamptz", MappingRule::Rust("jiff::Timestamp")),
    (
        "timestamp without time zone",
        MappingRule::Rust("jiff::civil::DateTime"),
    ),
    ("timestamp", MappingRule::Rust("jiff::civil::DateTime")),
    ("json", MappingRule::Json),
    ("jsonb", MappingRule::Json),
];

/// Look up the mapping rule for a canonical SQL type name.
pub fn rule_for(canonical: &str) -> Option<MappingRule> {
    TYPE_RULES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, rule)| *rule)
}

/// Remove trailing array markers (`[]`, `[3]`, `[3][2]`, …) from a type name.
///
/// Only bracket groups at the end are removed, so a quoted name such as
/// `"odd[name]"[]` keeps its own brackets.
pub fn strip_array_markers(sql_type: &str) -> &str {
    let mut base = sql_type.trim_end();
    while base.ends_with(']') {
        match base.rfind('[') {
            Some(idx) => base = base[..idx].trim_end(),
            None => break,
        }
    }
    base
}

/// Remove type modifiers so `numeric(10,2)` looks up as `numeric` and
/// `timestamp(3) with time zone` as `timestamp with time zone`.
pub fn canonical_type_name(sql_type: &str) -> String {
    let mut out = String::with_capacity(sql_type.len());
    let mut depth = 0usize;
    for ch in sql_type.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map one column to a Rust type.
///
/// - arrays: markers are stripped before lookup and the scalar is wrapped in
///   `Vec<…>` once per dimension; arrays are never wrapped in `Option`
/// - scalars: `Option<…>` unless the column is `NOT NULL`
/// - `json`/`jsonb` and unknown types: `needs_manual_review`, with a
///   placeholder that will not compile
pub fn map_column(col: &ColumnDescriptor) -> TypeDescriptor {
    let is_array = col.array_dims > 0;
    let base = if is_array {
        strip_array_markers(&col.sql_type)
    } else {
        col.sql_type.as_str()
    };

    let storage_tag = if is_array {
        format!("type:{base},array")
    } else {
        format!("type:{base}")
    };

    match rule_for(&canonical_type_name(base)) {
        Some(MappingRule::Rust(scalar)) => {
            let language_type = if is_array {
                let mut ty = scalar.to_string();
                for _ in 0..col.array_dims {
                    ty = format!("Vec<{ty}>");
                }
                ty
            } else if col.not_null {
                scalar.to_string()
            } else {
                format!("Option<{scalar}>")
            };

            TypeDescriptor {
                language_type,
                storage_tag,
                needs_manual_review: false,
            }
        }
        Some(MappingRule::Json) => TypeDescriptor {
            language_type: placeholder(&format!(
                "pick a Rust type for `{base}`: serde_json::Value, Vec<u8> or Box<serde_json::value::RawValue>"
            )),
            storage_tag,
            needs_manual_review: true,
        },
        None => TypeDescriptor {
            language_type: placeholder(&format!("no Rust mapping for `{base}`, bind it manually")),
            storage_tag,
            needs_manual_review: true,
        },
    }
}

/// A type-position `compile_error!` carrying `message`.
fn placeholder(message: &str) -> String {
    // Debug formatting yields a valid, escaped Rust string literal.
    format!("compile_error!({message:?})")
}
