#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// As typed, used to rebuild the title
    pub raw: String,
    /// Lowercase with surrounding punctuation removed, used for matching
    pub norm: String,
}

pub fn tokenize(input: &str) -> Vec<Token> {
    input
        .split_whitespace()
        .map(|raw| Token {
            raw: raw.to_string(),
            norm: normalize(raw),
        })
        .collect()
}

fn normalize(raw: &str) -> String {
    raw.trim_matches(|c: char| matches!(c, ',' | '.' | '!' | '?' | ';' | '"' | '(' | ')'))
        .to_lowercase()
}
