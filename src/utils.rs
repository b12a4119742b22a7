//! Small shared helpers.

/// Truncate a string for log or console output.
///
/// Long values are cut at `max` characters with an ellipsis and a byte-count
/// indicator appended. Cuts land on a char boundary so multi-byte text
/// (accented Portuguese headlines included) never splits mid-character.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}…(+{} bytes)", cut, s.len() - cut.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_for_log("Aposta do dia", 100), "Aposta do dia");
    }

    #[test]
    fn long_strings_are_cut_with_an_indicator() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn cut_respects_multibyte_characters() {
        let s = "Regulamentação das apostas esportivas no país";
        let result = truncate_for_log(s, 14);
        assert!(result.starts_with("Regulamentação"));
    }
}
