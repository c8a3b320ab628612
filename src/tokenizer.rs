/// Splits a command line into whitespace-separated words.
///
/// Only space and tab separate words. Each token borrows from `line`;
/// there is no quoting and no escape handling, so `"a b"` is two tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split([' ', '\t'])
        .filter(|word| !word.is_empty())
        .collect()
}
