//! Title normalization for fuzzy equality.
//!
//! Two titles that differ only in case, accents, bracketed qualifiers,
//! edition suffixes, trailing year tags or punctuation normalize to the same
//! string.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// `(...)` and `[...]` groups, one nesting level.
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").unwrap());

/// Dash-separated edition/version suffix at the end of a title.
///
/// "- Remastered 2011", "- 2011 Remaster", "- Single Version", "- Radio Edit",
/// "- Edit", "- Extended Mix", "- Live", "- Deluxe Edition", "- Explicit",
/// "- Clean".
static EDITION_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \s*[-–—]\s*
        (?:
            (?:\d{4}\s+)?remaster(?:ed)?(?:\s+\d{4})?
          | single\s+version
          | radio\s*edit
          | edit
          | extended(?:\s+(?:version|mix))?
          | live
          | deluxe
          | explicit
          | clean
        )
        (?:\s+(?:version|edition))?
        \s*$",
    )
    .unwrap()
});

/// Bare trailing year tag: "Song 2023", "Song - 2023".
static YEAR_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[-–—]?\s*\b\d{4}\s*$").unwrap());

/// Apostrophes join a word rather than separate it ("don't" -> "dont").
static APOSTROPHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"['’`]").unwrap());

/// Runs of anything that is not a letter or digit.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

/// Canonicalize a title for duplicate detection.
///
/// Deterministic and total: the empty string maps to the empty string, and a
/// title made only of a bracketed phrase (e.g. "(Intro)") keeps that phrase.
pub fn normalize_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let folded: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let unbracketed = BRACKETED.replace_all(&folded, "");
    let mut text = if has_word(&unbracketed) {
        unbracketed.into_owned()
    } else {
        folded.clone()
    };

    // Suffixes can stack ("- Live - 2009 Remaster"), so strip to a fixed point.
    loop {
        let stripped = strip_once(&text);
        if stripped == text {
            break;
        }
        text = stripped;
    }

    let text = APOSTROPHES.replace_all(&text, "");
    SEPARATORS.replace_all(&text, " ").trim().to_string()
}

/// Drop one edition suffix or year tag, unless that would leave nothing.
fn strip_once(text: &str) -> String {
    for pattern in [&*EDITION_SUFFIX, &*YEAR_SUFFIX] {
        let stripped = pattern.replace(text, "");
        if stripped != text && has_word(&stripped) {
            return stripped.into_owned();
        }
    }
    text.to_string()
}

fn has_word(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_plain() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("Song Title"), "song title");
    }

    #[test]
    fn test_bracket_only_title_survives() {
        assert_eq!(normalize_title("(Intro)"), "intro");
        assert_eq!(normalize_title("[Untitled]"), "untitled");
    }

    #[test]
    fn test_diacritics_and_case() {
        assert_eq!(normalize_title("Café Déjà Vu"), "cafe deja vu");
        assert_eq!(normalize_title("BJÖRK"), "bjork");
    }

    #[test]
    fn test_bracketed_qualifiers_removed() {
        assert_eq!(normalize_title("Song (feat. Someone)"), "song");
        assert_eq!(normalize_title("Song [Remastered]"), "song");
        assert_eq!(normalize_title("Song Title (Single Version)"), "song title");
    }

    #[test]
    fn test_edition_suffixes() {
        let expected = "song title";
        for title in [
            "Song Title - Remastered 2023",
            "Song Title - 2011 Remaster",
            "Song Title - Remaster",
            "Song Title - Single Version",
            "Song Title - Radio Edit",
            "Song Title - Edit",
            "Song Title - Extended Version",
            "Song Title - Extended Mix",
            "Song Title - Live",
            "Song Title - Deluxe Edition",
            "Song Title - Explicit",
            "Song Title - Clean",
            "Song Title – Remastered",
        ] {
            assert_eq!(normalize_title(title), expected, "title: {}", title);
        }
    }

    #[test]
    fn test_stacked_suffixes() {
        assert_eq!(normalize_title("Song - Live - 2009 Remaster"), "song");
        assert_eq!(normalize_title("Song - Radio Edit (2015)"), "song");
    }

    #[test]
    fn test_year_tags() {
        assert_eq!(normalize_title("Song - 2023"), "song");
        assert_eq!(normalize_title("Song 1999"), "song");
        // A title that is only a year keeps it.
        assert_eq!(normalize_title("1999"), "1999");
    }

    #[test]
    fn test_suffix_word_alone_is_kept() {
        assert_eq!(normalize_title("Live"), "live");
        assert_eq!(normalize_title("Edit"), "edit");
        assert_eq!(normalize_title("Live Wire"), "live wire");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(normalize_title("Don't Stop...  Believin'!"), "dont stop believin");
        assert_eq!(normalize_title("Jay-Z / Kanye"), "jay z kanye");
        assert_eq!(normalize_title("  spaced   out  "), "spaced out");
    }

    #[test]
    fn test_deterministic() {
        let title = "Sómé Tïtle (Live) - Remastered 2001";
        assert_eq!(normalize_title(title), normalize_title(title));
        assert_eq!(normalize_title(title), "some title");
    }
}
