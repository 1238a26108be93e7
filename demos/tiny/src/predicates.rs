//! Token classifiers used by the grammar's predicate nodes.

/// Words that can never be identifiers, compared ignoring case.
const KEYWORDS: &[&str] = &["int", "real", "if", "else", "return"];

/// Block delimiters, which are case-sensitive.
const DELIMITERS: &[&str] = &["BEGIN", "END"];

/// A letter or `_` followed by letters, digits or `_`, excluding reserved
/// words.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.iter().any(|word| word.eq_ignore_ascii_case(text))
        && !DELIMITERS.contains(&text)
}

/// Hex (`0x1F`), octal (`017`) or decimal (`12`, `1.5`, `2e-3`) literal.
pub fn is_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', hex @ ..] => !hex.is_empty() && hex.iter().all(u8::is_ascii_hexdigit),
        [b'0', octal @ ..] if !octal.is_empty() && octal.iter().all(u8::is_ascii_digit) => {
            octal.iter().all(|b| (b'0'..=b'7').contains(b))
        }
        _ => is_decimal(text),
    }
}

fn digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

/// `digits ('.' digits)? ([eE] [+-]? digits)?`
fn is_decimal(text: &str) -> bool {
    let whole = digits(text);
    if whole == 0 {
        return false;
    }
    let mut rest = &text[whole..];
    if let Some(fraction) = rest.strip_prefix('.') {
        let n = digits(fraction);
        if n == 0 {
            return false;
        }
        rest = &fraction[n..];
    }
    if let Some(exponent) = rest.strip_prefix(['e', 'E']) {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        let n = digits(exponent);
        return n > 0 && n == exponent.len();
    }
    rest.is_empty()
}

fn is_quoted(text: &str, quote: char) -> bool {
    text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote)
}

/// A double-quoted string literal.
pub fn is_string(text: &str) -> bool {
    is_quoted(text, '"')
}

/// A single-quoted character literal.
pub fn is_character(text: &str) -> bool {
    is_quoted(text, '\'')
}
