/// Terminal columns taken by `text`; non-ASCII characters count as two.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars()
        .fold(0, |acc, c| acc + if c.is_ascii() { 1 } else { 2 })
}

/// Cuts `text` to fit `width` columns, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }

    let mut result = String::with_capacity(width);
    let mut current_width = 0;

    for c in text.chars() {
        let char_width = if c.is_ascii() { 1 } else { 2 };
        if current_width + char_width < width {
            result.push(c);
            current_width += char_width;
        } else {
            break;
        }
    }

    if width > 0 {
        result.push('…');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("迪拜"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Dubai", 5), "Dubai");
        assert_eq!(truncate_to_width("Dubai", 18), "Dubai");
    }

    #[test]
    fn long_text_ends_with_ellipsis() {
        assert_eq!(truncate_to_width("Departures Hall", 8), "Departu…");
        assert_eq!(truncate_to_width("迪拜机场", 5), "迪拜…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
