//! Literal decoding
//!
//! Tokens keep their exact source spelling. The helpers here turn that
//! spelling into values and explain malformed quoted strings.

/// Numeric value of a `Number` token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Integer(i128),
    Float(f64),
}

/// Decode a charstring literal including its surrounding quotes.
///
/// `""` and `\"` both stand for a single quote character. Every other
/// backslash escape is kept as written.
pub fn decode_charstring(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if chars.peek() == Some(&'"') => {
                chars.next();
                result.push('"');
            }
            '\\' => match chars.next() {
                Some('"') => result.push('"'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            },
            c => result.push(c),
        }
    }
    result
}

/// Parse a `Number` token. Underscores in the exponent are ignored.
pub fn parse_number(raw: &str) -> Option<NumberValue> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    if cleaned.contains(['.', 'e', 'E']) {
        cleaned.parse::<f64>().ok().map(NumberValue::Float)
    } else {
        cleaned.parse::<i128>().ok().map(NumberValue::Integer)
    }
}

/// Split a quoted literal such as `'0F'O` into its body and suffix.
pub fn split_quoted(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix('\'')?;
    let close = rest.find('\'')?;
    Some((&rest[..close], &rest[close + 1..]))
}

/// Explain why a quoted literal does not form a bit, hex or octet string.
pub fn malformed_reason(raw: &str) -> String {
    let Some((body, suffix)) = split_quoted(raw) else {
        return "unterminated quoted string".to_string();
    };

    let allowed: fn(char) -> bool = match suffix {
        "b" | "B" => |c| matches!(c, '0' | '1' | '*' | '?' | ' '),
        "h" | "H" | "o" | "O" => |c| c.is_ascii_hexdigit() || matches!(c, '*' | '?' | ' '),
        "" => return "quoted string is missing a B, H or O suffix".to_string(),
        other => return format!("unknown string suffix `{}`", other),
    };

    if body.is_empty() {
        return "empty quoted string".to_string();
    }
    match body.chars().find(|c| !allowed(*c)) {
        Some(c) => format!("invalid character `{}` in quoted string", c),
        None => "malformed quoted string".to_string(),
    }
}
