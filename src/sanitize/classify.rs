//! Alternate-version detection by title.
//!
//! A trigger word (live, remix, instrumental, acoustic, a cappella, rock
//! version) only counts when it closes a bracketed qualifier, opens the last
//! `- ...` segment, or sits next to a qualifying word. Titles that merely use
//! the word ("Live Wire", "Remixed Emotions", "Intro - Live Wire") are left
//! alone.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trigger terms that mark a version when used as a qualifier.
const TRIGGERS: &[&str] = &[
    r"live",
    r"remix(?:ed)?",
    r"rmx",
    r"instrumental",
    r"acoustic",
    r"a\s?cc?app?ell?a",
];

/// Words that turn a following trigger into a version marker.
const QUALIFIERS: &str = r"version|mix|edit|track|take";

/// What may follow a trigger inside its qualifier: a qualifier word, then a
/// venue ("at Wembley") or a year. `stop` is the character class that ends
/// the qualifier.
fn trigger_tail(stop: &str) -> String {
    format!(
        r"(?:\s+(?:{q}))?(?:\s+(?:at|from|in|on)\b[^{stop}]*|\s+\d{{4}})?",
        q = QUALIFIERS,
        stop = stop
    )
}

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let triggers = TRIGGERS.join("|");
    let bracket_tail = trigger_tail(r")\]");
    let dash_tail = trigger_tail("-–—");
    vec![
        // "(Live)", "[Live 2009]", "(Recorded Live)", "(DJ Foo Remix)"
        Regex::new(&format!(
            r"(?i)[(\[](?:[^)\]]*\s)?(?:{}){}\s*[)\]]",
            triggers, bracket_tail
        ))
        .unwrap(),
        // "Song - Acoustic", "Song - Live at Wembley", "Song - Remixed"
        Regex::new(&format!(r"(?i)\s[-–—]\s+(?:{}){}\s*$", triggers, dash_tail)).unwrap(),
        // "Song - DJ Foo Remix"
        Regex::new(&format!(
            r"(?i)\s[-–—]\s+[^-–—]*\s(?:remix|rmx)(?:\s+(?:{}))?\s*$",
            QUALIFIERS
        ))
        .unwrap(),
        // "Song Acoustic Version", "Song Remix Edit"
        Regex::new(&format!(r"(?i)\b(?:{})\s+(?:{})\b", triggers, QUALIFIERS)).unwrap(),
        // "Song Live at the BBC", "Live from Tokyo"
        Regex::new(r"(?i)\blive\s+(?:at|from|in|version|recording|performance|session)\b").unwrap(),
        // "Song (Rock Version)", "Song - Rock Mix"
        Regex::new(r"(?i)\brock\s+(?:version|mix)\b").unwrap(),
    ]
});

/// Whether `title` names an alternate recording of a song.
pub fn is_alternate_version(title: &str) -> bool {
    PATTERNS.iter().any(|re| re.is_match(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_vocabulary_not_excluded() {
        for title in [
            "Live Wire",
            "Live It Up",
            "Remixed Emotions",
            "Instrumentality of Man",
            "Acoustics 101",
            "Rock and Roll",
            "Normal Song",
            "Intro - Live Wire",
            "Side A - Remixed Emotions",
            "Overture (Live Wire)",
            "Hello - We Live Forever",
            "Punk Rock Take Over",
            "Song (Alive)",
            "Song - Lively",
        ] {
            assert!(!is_alternate_version(title), "title: {}", title);
        }
    }

    #[test]
    fn test_live_versions() {
        for title in [
            "Song (Live)",
            "Song Title - Live at Madison Square Garden",
            "Song - Live",
            "Song [Live 2009]",
            "Song Live from Tokyo",
            "Song - Live at Wembley 1986",
            "Song (Live in Berlin)",
            "Song (Recorded Live)",
        ] {
            assert!(is_alternate_version(title), "title: {}", title);
        }
    }

    #[test]
    fn test_remix_versions() {
        for title in [
            "Song - Remix",
            "Song - DJ Foo Remix",
            "Song Title (Remix)",
            "Song Title - Remixed",
            "Song Title (RMX)",
            "Song (DJ Foo Remix)",
            "Song Remix Edit",
        ] {
            assert!(is_alternate_version(title), "title: {}", title);
        }
    }

    #[test]
    fn test_other_families() {
        for title in [
            "Song (Instrumental)",
            "Song Title (Instrumental Version)",
            "Song Title - Instrumental",
            "Song - Acoustic",
            "Song Title (Acoustic Version)",
            "Song (A Cappella)",
            "Song - Acapella",
            "Song (Rock Version)",
            "Song - Rock Mix",
        ] {
            assert!(is_alternate_version(title), "title: {}", title);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_alternate_version("SONG (LIVE)"));
        assert!(is_alternate_version("song - acoustic"));
    }

    #[test]
    fn test_hyphenated_words_are_not_separators() {
        assert!(!is_alternate_version("Live-Wire"));
        assert!(!is_alternate_version("Jay-Z Remixed Emotions"));
    }
}
