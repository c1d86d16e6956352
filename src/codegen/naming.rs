//! Identifier conversion for generated Rust source.

/// Keywords that can be escaped as raw identifiers.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers and get a trailing underscore instead.
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Split an identifier into lowercase words on separators and case boundaries.
///
/// `getHTTPStatus` becomes `["get", "http", "status"]`.
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn leading_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// `snake_case` identifier usable as a function, field or module name.
///
/// Returns an empty string when `input` holds no ASCII alphanumerics.
pub fn snake_case(input: &str) -> String {
    let joined = words(input).join("_");
    if joined.is_empty() {
        return joined;
    }
    if leading_digit(&joined) {
        return format!("_{joined}");
    }
    escape_keyword(joined)
}

/// `PascalCase` identifier usable as a type or variant name.
///
/// Returns an empty string when `input` holds no ASCII alphanumerics.
pub fn pascal_case(input: &str) -> String {
    let joined: String = words(input)
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if leading_digit(&joined) {
        return format!("_{joined}");
    }
    escape_keyword(joined)
}

fn escape_keyword(ident: String) -> String {
    if RESERVED_PATH_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if RAW_KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}

/// Name without a leading `r#`, as it appears on the wire.
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_from_camel_and_pascal() {
        assert_eq!(snake_case("getUser"), "get_user");
        assert_eq!(snake_case("GetUser"), "get_user");
        assert_eq!(snake_case("get_user"), "get_user");
        assert_eq!(snake_case("Users_GetUser"), "users_get_user");
    }

    #[test]
    fn snake_case_splits_acronyms() {
        assert_eq!(snake_case("getHTTPStatus"), "get_http_status");
        assert_eq!(snake_case("HTMLParser"), "html_parser");
        assert_eq!(snake_case("getAPI"), "get_api");
    }

    #[test]
    fn snake_case_namespace() {
        assert_eq!(snake_case("MyGeneratedApiClient"), "my_generated_api_client");
        assert_eq!(snake_case("my-generated.api client"), "my_generated_api_client");
    }

    #[test]
    fn pascal_case_types() {
        assert_eq!(pascal_case("User"), "User");
        assert_eq!(pascal_case("error_body"), "ErrorBody");
        assert_eq!(pascal_case("health-response"), "HealthResponse");
        assert_eq!(pascal_case("HTTPStatus"), "HttpStatus");
        assert_eq!(pascal_case("in_progress"), "InProgress");
    }

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(snake_case("type"), "r#type");
        assert_eq!(snake_case("self"), "self_");
        assert_eq!(pascal_case("self"), "Self_");
        assert_eq!(unraw("r#type"), "type");
        assert_eq!(unraw("name"), "name");
    }

    #[test]
    fn leading_digits_are_prefixed() {
        assert_eq!(snake_case("2fa"), "_2fa");
        assert_eq!(pascal_case("404"), "_404");
    }

    #[test]
    fn symbols_only_yield_empty() {
        assert_eq!(snake_case("--"), "");
        assert_eq!(pascal_case(""), "");
    }
}
