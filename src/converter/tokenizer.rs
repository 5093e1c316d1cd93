use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Commas, semicolons and the ECMAScript whitespace set (which counts
    // U+FEFF but not U+0085) all act as one separator run
    static ref SEPARATORS: Regex = Regex::new(
        r"[,;\t\n\x{0B}\x{0C}\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+"
    )
    .unwrap();
}

/// Split raw input into tokens, keeping their left-to-right order.
pub fn tokenize(raw: &str) -> Vec<&str> {
    SEPARATORS
        .split(raw)
        .filter(|token| !token.is_empty())
        .collect()
}
