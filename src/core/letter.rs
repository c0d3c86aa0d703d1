use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// One user-perceived character of the word. Urdu letters can span several
/// codepoints (a base letter plus combining marks), so comparison and
/// display work on grapheme clusters rather than `char`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(String);

impl Letter {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Splits a string into its letters.
pub fn letters(s: &str) -> impl Iterator<Item = Letter> + '_ {
    s.graphemes(true).map(Letter::from)
}

impl From<&str> for Letter {
    fn from(s: &str) -> Self {
        debug_assert_eq!(
            s.graphemes(true).count(),
            1,
            "a letter is a single grapheme cluster"
        );

        Self(s.to_owned())
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for Letter {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
