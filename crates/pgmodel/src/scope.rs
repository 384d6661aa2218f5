//! Which part of the catalog a run looks at.

use pgmodel_schema::RelationKind;

/// Relation kind selector used when no explicit table list is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// Ordinary tables only
    Tables,
    /// Views only
    Views,
    /// Tables and views
    #[default]
    Both,
}

impl KindFilter {
    /// Parse a kind selector.
    ///
    /// `r`, `t` and `table` select tables, `v` and `view` select views.
    /// Anything else, including the empty string, selects both.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "r" | "t" | "table" => KindFilter::Tables,
            "v" | "view" => KindFilter::Views,
            _ => KindFilter::Both,
        }
    }

    /// The relation kinds this filter lets through.
    pub fn relation_kinds(&self) -> &'static [RelationKind] {
        match self {
            KindFilter::Tables => &[RelationKind::Table],
            KindFilter::Views => &[RelationKind::View],
            KindFilter::Both => &[RelationKind::Table, RelationKind::View],
        }
    }
}

/// Filters for one resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryScope {
    /// Schema names; empty means every user schema.
    pub schemas: Vec<String>,
    /// Table or view names; empty means no name filter.
    ///
    /// When set, `kind` is ignored and both tables and views match.
    pub tables: Vec<String>,
    /// Relation kind selector.
    pub kind: KindFilter,
}

impl QueryScope {
    /// Build a scope from comma-separated lists, e.g. `"public,billing"`.
    pub fn from_lists(schemas: &str, tables: &str, kind: &str) -> Self {
        Self {
            schemas: split_list(schemas),
            tables: split_list(tables),
            kind: KindFilter::parse(kind),
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
