//! Char-indexed editing helpers shared by text fields.
//!
//! Cursors count chars, not bytes, and are clamped to the value length
//! before use.

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

pub fn insert_char(value: &mut String, cursor: &mut usize, ch: char) {
    let pos = clamp_cursor(*cursor, value);
    value.insert(byte_index_at_char(value, pos), ch);
    *cursor = pos + 1;
}

pub fn backspace_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    value.remove(byte_index_at_char(value, pos - 1));
    *cursor = pos - 1;
    true
}

pub fn delete_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    value.remove(byte_index_at_char(value, pos));
    *cursor = pos;
    true
}

pub fn move_left(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    *cursor = pos.saturating_sub(1);
    pos > 0
}

pub fn move_right(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        *cursor = pos;
        return false;
    }
    *cursor = pos + 1;
    true
}

pub fn delete_word_left(value: &mut String, cursor: &mut usize) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());

    let mut start = pos;
    while start > 0 && is_separator(chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_separator(chars[start - 1]) {
        start -= 1;
    }

    *cursor = start;
    if start == pos {
        return false;
    }
    value.replace_range(byte_index_at_char(value, start)..byte_index_at_char(value, pos), "");
    true
}

pub fn delete_word_right(value: &mut String, cursor: &mut usize) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());

    let mut end = pos;
    while end < chars.len() && is_separator(chars[end]) {
        end += 1;
    }
    while end < chars.len() && !is_separator(chars[end]) {
        end += 1;
    }

    *cursor = pos;
    if end == pos {
        return false;
    }
    value.replace_range(byte_index_at_char(value, pos)..byte_index_at_char(value, end), "");
    true
}

pub fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | '-' | '(' | ')' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_handle_multibyte_chars() {
        let mut value = String::from("Cte");
        let mut cursor = 1;
        insert_char(&mut value, &mut cursor, 'ô');
        assert_eq!(value, "Côte");
        assert_eq!(cursor, 2);
        assert!(backspace_char(&mut value, &mut cursor));
        assert_eq!(value, "Cte");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn delete_at_end_is_a_no_op() {
        let mut value = String::from("Chad");
        let mut cursor = 4;
        assert!(!delete_char(&mut value, &mut cursor));
        cursor = 0;
        assert!(delete_char(&mut value, &mut cursor));
        assert_eq!(value, "had");
    }

    #[test]
    fn word_deletion_stops_at_separators() {
        let mut value = String::from("Papua New Guinea");
        let mut cursor = char_count(&value);
        assert!(delete_word_left(&mut value, &mut cursor));
        assert_eq!(value, "Papua New ");
        assert_eq!(cursor, 10);

        let mut cursor = 0;
        assert!(delete_word_right(&mut value, &mut cursor));
        assert_eq!(value, " New ");
    }

    #[test]
    fn cursor_moves_are_bounded() {
        let mut cursor = 0;
        assert!(!move_left(&mut cursor, "ab"));
        assert!(move_right(&mut cursor, "ab"));
        assert!(move_right(&mut cursor, "ab"));
        assert!(!move_right(&mut cursor, "ab"));
        assert_eq!(cursor, 2);
    }
}
