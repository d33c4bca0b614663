//! Shared keyword sets used by both a generator (to embed a detectable
//! signal) and its matching analyzer (to detect it): the generator and
//! the detector must share the same keyword set.

/// Always present in a synthetic revert message.
pub const REVERT_KEYWORDS: &[&str] = &["revert"];

/// A merged PR qualifies as a hotfix candidate if its title or body
/// contains one of these, whole-word, case-insensitively.
pub const HOTFIX_KEYWORDS: &[&str] = &["fix", "hotfix", "urgent", "patch"];

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Whole-word, case-insensitive match against `keywords`.
pub fn contains_any_keyword(text: &str, keywords: &[&str]) -> bool {
    let words: std::collections::HashSet<String> = tokenize(text).collect();
    keywords.iter().any(|k| words.contains(&k.to_lowercase()))
}

pub fn is_revert_message(text: &str) -> bool {
    contains_any_keyword(text, REVERT_KEYWORDS)
}

pub fn is_hotfix_candidate(title: &str, body: &str) -> bool {
    contains_any_keyword(title, HOTFIX_KEYWORDS) || contains_any_keyword(body, HOTFIX_KEYWORDS)
}
