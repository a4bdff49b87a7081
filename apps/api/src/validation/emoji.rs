//! Emoji, pictograph and dingbat detection.

/// Inclusive code point ranges rejected in free-text fields.
///
/// The last range is deliberately wide (enclosed alphanumerics through the
/// enclosed ideographic supplement) and swallows the dingbats block.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs
    (0x1F680, 0x1F6FF), // transport & map
    (0x1F1E0, 0x1F1FF), // regional indicators (flags)
    (0x2702, 0x27B0),   // dingbats
    (0x24C2, 0x1F251),
];

pub fn is_emoji(c: char) -> bool {
    let code = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// Returns the first offending character, if any.
pub fn find_emoji(text: &str) -> Option<char> {
    text.chars().find(|&c| is_emoji(c))
}

pub fn contains_emoji(text: &str) -> bool {
    find_emoji(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_range() {
        for c in [
            '\u{1F600}',
            '\u{1F64F}',
            '\u{1F300}',
            '\u{1F680}',
            '\u{1F1FA}',
            '\u{2702}',
            '\u{27B0}',
            '\u{24C2}',
            '\u{1F251}',
        ] {
            assert!(is_emoji(c), "expected {:?} to be rejected", c);
        }
    }

    #[test]
    fn test_emoji_inside_text() {
        assert!(contains_emoji("Shipped the launch \u{1F680} on time"));
        assert_eq!(find_emoji("ok \u{2705} done \u{1F600}"), Some('\u{2705}'));
    }

    #[test]
    fn test_latin_text_never_flagged() {
        let samples = [
            "Senior Software Engineer",
            "José Müller-Øberg, Zürich",
            "C++, C#, F#, .NET (Core) & SQL; 100% uptime!",
            "Bullet • en–dash — em‘quotes’ “double”",
            "~`!@#$%^&*()_+-=[]{}|\\:;\"'<>,.?/",
        ];
        for s in samples {
            assert!(!contains_emoji(s), "false positive on {s:?}");
        }
    }

    #[test]
    fn test_range_edges_outside() {
        assert!(!is_emoji('\u{24C1}'));
        assert!(!is_emoji('\u{1F252}'));
        assert!(is_emoji('\u{1F6FF}'));
        assert!(!is_emoji('\u{1F700}'));
    }
}
