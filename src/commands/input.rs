//! Input tokenizing

/// Splits a REPL line into lowercase words, dropping empty ones.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
