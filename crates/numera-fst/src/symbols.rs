// Label encoding: one label per Unicode scalar value, 0 reserved for epsilon.
//
// Grammars are written over characters, so no symbol table is needed at
// runtime or on disk. NUL cannot be represented (it collides with epsilon).

use crate::{EPSILON, FstError, Label};

/// Convert a character to its label.
#[inline]
pub fn label(ch: char) -> Label {
    ch as Label
}

/// Convert a string to its label sequence (NUL characters are dropped).
pub fn to_labels(s: &str) -> Vec<Label> {
    s.chars().map(label).filter(|&l| l != EPSILON).collect()
}

/// Check that a label read from untrusted data is epsilon or a scalar value.
pub fn validate(l: Label) -> Result<(), FstError> {
    if l == EPSILON || char::from_u32(l).is_some() {
        Ok(())
    } else {
        Err(FstError::InvalidLabel(l))
    }
}

/// Render a label sequence as a string, skipping epsilons.
pub fn render(labels: &[Label]) -> String {
    labels
        .iter()
        .filter(|&&l| l != EPSILON)
        .map(|&l| char::from_u32(l).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrillic_labels_round_trip() {
        let labels = to_labels("ноль");
        assert_eq!(labels.len(), 4);
        assert_eq!(render(&labels), "ноль");
    }

    #[test]
    fn render_skips_epsilon() {
        let labels = vec![label('a'), EPSILON, label('b')];
        assert_eq!(render(&labels), "ab");
    }

    #[test]
    fn nul_is_dropped() {
        assert_eq!(to_labels("a\0b"), vec![label('a'), label('b')]);
    }

    #[test]
    fn surrogate_label_is_invalid() {
        assert!(validate(0xD800).is_err());
        assert!(validate(0x11_0000).is_err());
        assert!(validate(EPSILON).is_ok());
        assert!(validate(label('ё')).is_ok());
    }
}
