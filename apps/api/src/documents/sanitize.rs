/// Removes NUL and other C0 control characters (keeping tab, LF and CR) plus DEL.
///
/// Text extracted from uploaded files regularly carries these bytes and
/// Postgres rejects NUL inside TEXT columns.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars().filter(|c| !is_stripped(*c)).collect()
}

fn is_stripped(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{7F}')
}

/// Counts whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
