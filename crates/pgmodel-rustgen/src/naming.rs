//! Turning catalog names into Rust identifiers.

/// Keywords that may be used as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// `user_account` -> `UserAccount`.
///
/// Characters that cannot appear in an identifier act as separators, and a
/// leading digit gets a `T` prefix. An empty or separator-only name becomes
/// `Table`.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || !is_ident_char(c) {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    if result.is_empty() {
        return "Table".to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, 'T');
    }
    result
}

/// Make a column name usable as a field name.
///
/// The name is kept as close to the column as possible: invalid characters
/// become `_`, a leading digit gets a `_` prefix and keywords become raw
/// identifiers.
pub fn field_ident(column: &str) -> String {
    let mut ident: String = column
        .chars()
        .map(|c| if is_ident_char(c) { c } else { '_' })
        .collect();

    if ident.is_empty() {
        return "_column".to_string();
    }
    if ident == "_" {
        return "_column".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RAW_KEYWORDS.contains(&ident.as_str()) {
        return format!("r#{ident}");
    }
    if RESERVED_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user_id"), "UserId");
        assert_eq!(to_pascal_case("users"), "Users");
        assert_eq!(to_pascal_case("order__line_"), "OrderLine");
        assert_eq!(to_pascal_case("already_Pascal"), "AlreadyPascal");
        assert_eq!(to_pascal_case("audit-log"), "AuditLog");
        assert_eq!(to_pascal_case("2fa_codes"), "T2faCodes");
        assert_eq!(to_pascal_case("___"), "Table");
    }

    #[test]
    fn test_field_ident_plain() {
        assert_eq!(field_ident("created_at"), "created_at");
        assert_eq!(field_ident("Email"), "Email");
    }

    #[test]
    fn test_field_ident_keywords() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("match"), "r#match");
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("crate"), "crate_");
    }

    #[test]
    fn test_field_ident_invalid_chars() {
        assert_eq!(field_ident("2fa"), "_2fa");
        assert_eq!(field_ident("first name"), "first_name");
        assert_eq!(field_ident("price-€"), "price__");
        assert_eq!(field_ident(""), "_column");
        assert_eq!(field_ident("?"), "_column");
    }
}
