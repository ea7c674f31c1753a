//! Song-structure markers
//!
//! Generated lyrics carry section markers such as `[Verse 2]` or `[Припев]`.
//! They never participate in timing or highlighting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Closed vocabulary of section markers, including localized spellings
const SECTION_NAMES: &str = "Pre-Chorus|Post-Chorus|Verse|Chorus|Bridge|Outro|Intro|Hook|Refrain|Interlude|Break|Solo|Instrumental|Ad-lib|Coda|Куплет|Припев|Бридж|Аутро|Интро";

/// A whole token that is a marker, brackets optional: `Chorus`, `[Verse 2]`
static TAG_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\[?(?:{})(?:\s*\d*)?\]?$", SECTION_NAMES))
        .expect("section tag pattern is valid")
});

/// Bracketed markers embedded in free text
static TAG_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\[(?:{})(?:\s*\d*)?\]", SECTION_NAMES))
        .expect("section markup pattern is valid")
});

/// Three or more consecutive line breaks, tolerating trailing blanks
static BLANK_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[ \t]*\r?\n){3,}").expect("blank run pattern is valid"));

/// Check whether a token is a structural tag
pub fn is_structural_tag(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && TAG_TOKEN.is_match(text)
}

/// Strip section markup from plain lyrics and collapse blank runs to one empty line
pub fn clean_plain_lyrics(text: &str) -> String {
    let stripped = TAG_MARKUP.replace_all(text, "");
    BLANK_RUNS
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string()
}
