//! WinAnsiEncoding for the standard PDF fonts, plus folding of text the
//! encoding cannot represent.
//!
//! Folding order for a character outside WinAnsi:
//! - whitespace becomes a space
//! - accented Latin letters drop to their base letter (`Ł` → `L`, `ę` → `e`)
//! - Greek and Cyrillic are transliterated (`Ж` → `Zh`, `Ω` → `O`)
//! - anything else becomes `?` and is counted as unmapped

use std::borrow::Cow;

/// Maps a character to its WinAnsiEncoding byte, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// ASCII base letter of an accented Latin letter (Latin-1 Supplement,
/// Latin Extended-A and the Romanian comma-below letters).
pub fn latin_base(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ð' | 'Ď' | 'Đ' => 'D',
        'ð' | 'ď' | 'đ' => 'd',
        'È'..='Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => 'G',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'Ĥ' | 'Ħ' => 'H',
        'ĥ' | 'ħ' => 'h',
        'Ì'..='Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'Ĵ' => 'J',
        'ĵ' => 'j',
        'Ķ' => 'K',
        'ķ' | 'ĸ' => 'k',
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => 'L',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' | 'Ŋ' => 'N',
        'ñ' | 'ń' | 'ņ' | 'ň' | 'ŉ' | 'ŋ' => 'n',
        'Ò'..='Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ŕ' | 'Ŗ' | 'Ř' => 'R',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' | 'Ș' => 'S',
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' | 'ſ' => 's',
        'Ţ' | 'Ť' | 'Ŧ' | 'Ț' => 'T',
        'ţ' | 'ť' | 'ŧ' | 'ț' => 't',
        'Ù'..='Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ŵ' => 'W',
        'ŵ' => 'w',
        'Ý' | 'Ŷ' | 'Ÿ' => 'Y',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

#[rustfmt::skip]
const CYRILLIC_UPPER: [&str; 32] = [
    // А    Б    В    Г    Д    Е    Ж     З    И    Й    К    Л    М    Н    О    П
    "A", "B", "V", "G", "D", "E", "Zh", "Z", "I", "Y", "K", "L", "M", "N", "O", "P",
    // Р    С    Т    У    Ф    Х     Ц     Ч     Ш     Щ       Ъ   Ы    Ь   Э    Ю     Я
    "R", "S", "T", "U", "F", "Kh", "Ts", "Ch", "Sh", "Shch", "", "Y", "", "E", "Yu", "Ya",
];

#[rustfmt::skip]
const CYRILLIC_LOWER: [&str; 32] = [
    "a", "b", "v", "g", "d", "e", "zh", "z", "i", "y", "k", "l", "m", "n", "o", "p",
    "r", "s", "t", "u", "f", "kh", "ts", "ch", "sh", "shch", "", "y", "", "e", "yu", "ya",
];

#[rustfmt::skip]
const CYRILLIC_EXT_UPPER: [&str; 16] = [
    // Ѐ    Ё     Ђ     Ѓ    Є     Ѕ     І    Ї     Ј    Љ     Њ     Ћ    Ќ    Ѝ    Ў    Џ
    "E", "Yo", "Dj", "G", "Ye", "Dz", "I", "Yi", "J", "Lj", "Nj", "C", "K", "I", "U", "Dz",
];

#[rustfmt::skip]
const CYRILLIC_EXT_LOWER: [&str; 16] = [
    "e", "yo", "dj", "g", "ye", "dz", "i", "yi", "j", "lj", "nj", "c", "k", "i", "u", "dz",
];

#[rustfmt::skip]
const GREEK_UPPER: [&str; 25] = [
    // Α    Β    Γ    Δ    Ε    Ζ    Η    Θ     Ι    Κ    Λ    Μ    Ν    Ξ    Ο    Π    Ρ
    "A", "B", "G", "D", "E", "Z", "I", "Th", "I", "K", "L", "M", "N", "X", "O", "P", "R",
    // (U+03A2 unassigned) Σ    Τ    Υ    Φ    Χ     Ψ     Ω
    "S",                  "S", "T", "Y", "F", "Ch", "Ps", "O",
];

#[rustfmt::skip]
const GREEK_LOWER: [&str; 25] = [
    "a", "b", "g", "d", "e", "z", "i", "th", "i", "k", "l", "m", "n", "x", "o", "p", "r",
    // ς
    "s", "s", "t", "y", "f", "ch", "ps", "o",
];

fn table_lookup(table: &'static [&'static str], first: char, c: char) -> Option<&'static str> {
    let offset = (c as u32).checked_sub(first as u32)? as usize;
    table.get(offset).copied()
}

/// Latin transliteration of a Greek or Cyrillic letter.
pub fn transliterate(c: char) -> Option<&'static str> {
    match c {
        '\u{0410}'..='\u{042F}' => table_lookup(&CYRILLIC_UPPER, '\u{0410}', c),
        '\u{0430}'..='\u{044F}' => table_lookup(&CYRILLIC_LOWER, '\u{0430}', c),
        '\u{0400}'..='\u{040F}' => table_lookup(&CYRILLIC_EXT_UPPER, '\u{0400}', c),
        '\u{0450}'..='\u{045F}' => table_lookup(&CYRILLIC_EXT_LOWER, '\u{0450}', c),
        'Ґ' => Some("G"),
        'ґ' => Some("g"),
        '\u{0391}'..='\u{03A9}' => table_lookup(&GREEK_UPPER, '\u{0391}', c),
        '\u{03B1}'..='\u{03C9}' => table_lookup(&GREEK_LOWER, '\u{03B1}', c),
        'Ά' => Some("A"),
        'Έ' => Some("E"),
        'Ή' | 'Ί' | 'Ϊ' => Some("I"),
        'Ό' | 'Ώ' => Some("O"),
        'Ύ' | 'Ϋ' => Some("Y"),
        'ά' => Some("a"),
        'έ' => Some("e"),
        'ή' | 'ί' | 'ϊ' | 'ΐ' => Some("i"),
        'ό' | 'ώ' => Some("o"),
        'ύ' | 'ϋ' | 'ΰ' => Some("y"),
        'Ĳ' => Some("IJ"),
        'ĳ' => Some("ij"),
        _ => None,
    }
}

/// Text rewritten so that every character has a WinAnsi byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Folded<'a> {
    pub text: Cow<'a, str>,
    /// Characters with no rendition, written as `?`.
    pub unmapped: usize,
}

pub fn fold_to_win_ansi(text: &str) -> Folded<'_> {
    if text.chars().all(|c| win_ansi_byte(c).is_some()) {
        return Folded {
            text: Cow::Borrowed(text),
            unmapped: 0,
        };
    }

    let mut out = String::with_capacity(text.len());
    let mut unmapped = 0;
    for c in text.chars() {
        if win_ansi_byte(c).is_some() {
            out.push(c);
        } else if c.is_whitespace() {
            out.push(' ');
        } else if let Some(base) = latin_base(c) {
            out.push(base);
        } else if let Some(latin) = transliterate(c) {
            out.push_str(latin);
        } else {
            out.push('?');
            unmapped += 1;
        }
    }

    Folded {
        text: Cow::Owned(out),
        unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(text: &str) -> String {
        fold_to_win_ansi(text).text.into_owned()
    }

    #[test]
    fn test_win_ansi_text_is_borrowed_unchanged() {
        let folded = fold_to_win_ansi("José Müller • “Lead” – Zürich");
        assert!(matches!(folded.text, Cow::Borrowed(_)));
        assert_eq!(folded.unmapped, 0);
        assert_eq!(win_ansi_byte('Š'), Some(0x8A));
        assert_eq!(win_ansi_byte('é'), Some(0xE9));
        assert_eq!(win_ansi_byte('Ł'), None);
    }

    #[test]
    fn test_latin_extended_folds_to_base_letters() {
        assert_eq!(fold("Łukasz Wałęsa"), "Lukasz Walesa");
        assert_eq!(fold("Đorđe Čolić"), "Dorde Colic");
        assert_eq!(fold("Ştefan Țiriac"), "Stefan Tiriac");
        assert_eq!(fold("Erdős Pál"), "Erdos Pál");
    }

    #[test]
    fn test_greek_and_cyrillic_are_transliterated() {
        assert_eq!(fold("Юлия Щербакова"), "Yuliya Shcherbakova");
        assert_eq!(fold("Ζωή Καρρά"), "Zoi Karra");
        assert_eq!(fold("Їжак Ґанок"), "Yizhak Ganok");
    }

    #[test]
    fn test_unmappable_characters_are_counted() {
        let folded = fold_to_win_ansi("東京 office");
        assert_eq!(folded.text, "?? office");
        assert_eq!(folded.unmapped, 2);
    }

    #[test]
    fn test_exotic_whitespace_becomes_space() {
        assert_eq!(fold("a\u{2003}b"), "a b");
    }
}
