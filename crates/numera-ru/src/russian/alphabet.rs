// Alphabets used by the entity grammars

use numera_fst::{Fst, any_of};

pub const DIGITS: &str = "0123456789";

pub const RU_LOWER: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

pub const RU_UPPER: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";

/// Characters an electronic address is written with.
pub const ELECTRONIC_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789@.-_";

/// Whitespace removed between verbalized fields.
pub const WHITESPACE: &str = " \t\u{a0}";

pub fn digit() -> Fst {
    any_of(DIGITS)
}

/// One Cyrillic letter (either case) or a space.
pub fn ru_alpha_or_space() -> Fst {
    let mut chars = String::with_capacity(RU_LOWER.len() + RU_UPPER.len() + 1);
    chars.push_str(RU_LOWER);
    chars.push_str(RU_UPPER);
    chars.push(' ');
    any_of(&chars)
}

pub fn electronic_char() -> Fst {
    any_of(ELECTRONIC_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use numera_fst::top_path;

    #[test]
    fn alphabet_sizes() {
        assert_eq!(RU_LOWER.chars().count(), 33);
        assert_eq!(RU_UPPER.chars().count(), 33);
    }

    #[test]
    fn ru_alpha_or_space_accepts_single_symbols() {
        let fst = ru_alpha_or_space();
        assert!(top_path(&fst, "ё").is_ok());
        assert!(top_path(&fst, "Я").is_ok());
        assert!(top_path(&fst, " ").is_ok());
        assert!(top_path(&fst, "a").is_err());
        assert!(top_path(&fst, "аб").is_err());
    }

    #[test]
    fn electronic_chars_cover_separators() {
        let fst = electronic_char();
        for ch in ["@", ".", "-", "_", "z", "7"] {
            assert!(top_path(&fst, ch).is_ok(), "{ch}");
        }
    }
}
