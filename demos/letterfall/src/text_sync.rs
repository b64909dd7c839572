//! Reconciling the text control's value with the letters on screen.

/// What a new text value means for the letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// Same string; nothing to do.
    Unchanged,
    /// The old text is a prefix of the new one: drop these characters.
    Append(Vec<char>),
    /// Anything else: rebuild every letter in grid mode.
    Rebuild,
}

/// Classify the edit from `old` to `new`, comparing by character.
///
/// Shrinking always rebuilds. Growing appends the new characters when the
/// old text is kept as a prefix (typing, or pasting at the end) and
/// rebuilds otherwise. An equal-length edit rebuilds unless nothing changed.
pub fn reconcile(old: &str, new: &str) -> TextChange {
    if old == new {
        return TextChange::Unchanged;
    }
    let old_len = old.chars().count();
    let new_len = new.chars().count();
    if new_len > old_len && new.starts_with(old) {
        TextChange::Append(new[old.len()..].chars().collect())
    } else {
        TextChange::Rebuild
    }
}

/// Text to adopt from the `text` query parameter at boot: only when
/// nothing has been typed yet and the parameter is non-empty.
pub fn query_text(current: &str, param: Option<&str>) -> Option<String> {
    match param {
        Some(value) if current.is_empty() && !value.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends() {
        assert_eq!(reconcile("", "h"), TextChange::Append(vec!['h']));
        assert_eq!(reconcile("h", "hi"), TextChange::Append(vec!['i']));
    }

    #[test]
    fn pasting_at_the_end_appends_every_char() {
        assert_eq!(reconcile("ab", "abcd"), TextChange::Append(vec!['c', 'd']));
    }

    #[test]
    fn deleting_rebuilds() {
        assert_eq!(reconcile("hello", "hell"), TextChange::Rebuild);
        assert_eq!(reconcile("hello", ""), TextChange::Rebuild);
    }

    #[test]
    fn growing_in_the_middle_rebuilds() {
        assert_eq!(reconcile("hllo", "hello"), TextChange::Rebuild);
    }

    #[test]
    fn equal_length_edits() {
        assert_eq!(reconcile("cat", "cat"), TextChange::Unchanged);
        assert_eq!(reconcile("cat", "cot"), TextChange::Rebuild);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(reconcile("é", "éa"), TextChange::Append(vec!['a']));
        assert_eq!(reconcile("ab", "é"), TextChange::Rebuild);
    }

    #[test]
    fn query_text_only_fills_an_empty_session() {
        assert_eq!(query_text("", Some("hi there")).as_deref(), Some("hi there"));
        assert_eq!(query_text("typed", Some("hi")), None);
        assert_eq!(query_text("", Some("")), None);
        assert_eq!(query_text("", None), None);
    }
}
