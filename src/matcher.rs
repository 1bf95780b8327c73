//! Hand-off to the host regex engine.
//!
//! A [`Fragment`] compiles into a [`CompiledPattern`], which wraps the
//! engine's compiled form and offers the usual match, extraction, replace
//! and split helpers. Fragments themselves stay plain immutable data; the
//! compiled form is a separate value held (and discarded) by the caller,
//! so no invalidation protocol is needed.
//!
//! Every pattern is compiled under the fixed global matching policy:
//! multiline and dot-matches-newline. This is an invariant of the algebra,
//! not an option — `^` and `$` always match at line boundaries and `.`
//! always matches a newline.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use fancy_regex::Regex;

use crate::fragment::Fragment;

/// Inline flags realizing the fixed global matching policy.
const GLOBAL_FLAGS: &str = "(?ms)";

impl Fragment {
    /// Compile this fragment's pattern for matching.
    ///
    /// Compilation can reject patterns built from [`Fragment::raw`] text;
    /// patterns built purely from the algebra's own operators compile.
    pub fn compile(&self) -> Result<CompiledPattern> {
        CompiledPattern::new(self)
    }
}

/// A compiled pattern, ready for matching.
pub struct CompiledPattern {
    regex: Regex,
    /// Anchored variant for whole-subject matching, compiled on first use.
    exact: OnceCell<Regex>,
    text: String,
}

impl CompiledPattern {
    fn new(fragment: &Fragment) -> Result<Self> {
        let text = fragment.as_str().to_string();
        let regex = Regex::new(&format!("{GLOBAL_FLAGS}{text}"))
            .with_context(|| format!("compiling pattern \"{text}\""))?;
        Ok(CompiledPattern {
            regex,
            exact: OnceCell::new(),
            text,
        })
    }

    /// The pattern text this value was compiled from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether at least one match is found within `subject`.
    pub fn is_match(&self, subject: &str) -> Result<bool> {
        Ok(self.regex.is_match(subject)?)
    }

    /// Whether `subject` in its entirety matches the pattern.
    pub fn is_full_match(&self, subject: &str) -> Result<bool> {
        Ok(self.exact_regex()?.is_match(subject)?)
    }

    /// All matched substrings, in subject order.
    pub fn matches(&self, subject: &str) -> Result<Vec<String>> {
        let mut found = Vec::new();
        for m in self.regex.find_iter(subject) {
            found.push(m?.as_str().to_string());
        }
        Ok(found)
    }

    /// All matches together with their byte positions.
    pub fn matches_with_pos(&self, subject: &str) -> Result<Vec<(String, usize, usize)>> {
        let mut found = Vec::new();
        for m in self.regex.find_iter(subject) {
            let m = m?;
            found.push((m.as_str().to_string(), m.start(), m.end()));
        }
        Ok(found)
    }

    /// Per match, the text captured by each group, in group order.
    /// A group that did not take part in the match yields `None`.
    pub fn captures(&self, subject: &str) -> Result<Vec<Vec<Option<String>>>> {
        let mut found = Vec::new();
        for caps in self.regex.captures_iter(subject) {
            let caps = caps?;
            found.push(
                (1..caps.len())
                    .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                    .collect(),
            );
        }
        Ok(found)
    }

    /// Per match, a name-to-text map of the named capturing groups.
    pub fn named_captures(&self, subject: &str) -> Result<Vec<BTreeMap<String, Option<String>>>> {
        let names: Vec<&str> = self.regex.capture_names().flatten().collect();
        let mut found = Vec::new();
        for caps in self.regex.captures_iter(subject) {
            let caps = caps?;
            found.push(
                names
                    .iter()
                    .map(|&name| {
                        let value = caps.name(name).map(|m| m.as_str().to_string());
                        (name.to_string(), value)
                    })
                    .collect(),
            );
        }
        Ok(found)
    }

    /// Replace the first `count` matches with `replacement`, inserted
    /// literally; a `count` of zero replaces every match.
    pub fn replace(&self, subject: &str, replacement: &str, count: usize) -> Result<String> {
        let mut out = String::with_capacity(subject.len());
        let mut index = 0;
        let mut replaced = 0;
        for m in self.regex.find_iter(subject) {
            if count != 0 && replaced == count {
                break;
            }
            let m = m?;
            out.push_str(&subject[index..m.start()]);
            out.push_str(replacement);
            index = m.end();
            replaced += 1;
        }
        out.push_str(&subject[index..]);
        Ok(out)
    }

    /// Split `subject` on the occurring matches. Empty pieces between
    /// adjacent matches are omitted.
    pub fn split_by_match(&self, subject: &str) -> Result<Vec<String>> {
        let mut pieces = Vec::new();
        let mut index = 0;
        for m in self.regex.find_iter(subject) {
            let m = m?;
            if index != m.start() {
                pieces.push(subject[index..m.start()].to_string());
            }
            index = m.end();
        }
        if index != subject.len() {
            pieces.push(subject[index..].to_string());
        }
        Ok(pieces)
    }

    /// Whether at least one match is found in the file at `path`.
    pub fn is_match_in_file(&self, path: impl AsRef<Path>) -> Result<bool> {
        self.is_match(&read_subject(path)?)
    }

    /// All matched substrings found in the file at `path`.
    pub fn matches_in_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        self.matches(&read_subject(path)?)
    }

    fn exact_regex(&self) -> Result<&Regex> {
        if let Some(regex) = self.exact.get() {
            return Ok(regex);
        }
        let regex = Regex::new(&format!("{GLOBAL_FLAGS}\\A(?:{})\\z", self.text))
            .with_context(|| format!("compiling anchored pattern \"{}\"", self.text))?;
        Ok(self.exact.get_or_init(|| regex))
    }
}

/// Read a match subject from the file at `path`.
pub fn read_subject(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .with_context(|| format!("reading match subject from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::CharClass;
    use crate::ready;

    fn compiled(fragment: &Fragment) -> CompiledPattern {
        fragment.compile().expect("pattern should compile")
    }

    // --- Matching ---

    #[test]
    fn finds_matches_in_order() {
        let pattern = compiled(&CharClass::digit().to_fragment().one_or_more().unwrap());
        assert_eq!(
            pattern.matches("a1b22c333").unwrap(),
            vec!["1", "22", "333"]
        );
    }

    #[test]
    fn match_positions_are_byte_spans() {
        let pattern = compiled(&Fragment::from("ab"));
        assert_eq!(
            pattern.matches_with_pos("ab ab").unwrap(),
            vec![("ab".to_string(), 0, 2), ("ab".to_string(), 3, 5)]
        );
    }

    #[test]
    fn full_match_requires_the_whole_subject() {
        let pattern = compiled(&Fragment::from("abc"));
        assert!(pattern.is_full_match("abc").unwrap());
        assert!(!pattern.is_full_match("abcd").unwrap());
        assert!(pattern.is_match("abcd").unwrap());
    }

    #[test]
    fn dot_matches_newline_under_global_policy() {
        let pattern = compiled(&CharClass::any().to_fragment());
        assert!(pattern.is_full_match("\n").unwrap());
    }

    #[test]
    fn line_anchors_match_at_line_boundaries() {
        let pattern = compiled(&Fragment::from("b").match_at_line_start());
        assert!(pattern.is_match("a\nb").unwrap());

        let anchored = compiled(&Fragment::from("b").match_at_start());
        assert!(!anchored.is_match("a\nb").unwrap());
    }

    // --- Captures ---

    #[test]
    fn captures_by_position_and_name() {
        let pattern = Fragment::from("1")
            .concat(CharClass::digit().to_fragment().exactly(2).unwrap().capture_as("rest").unwrap());
        let compiled = compiled(&pattern);
        assert_eq!(
            compiled.captures("x123y").unwrap(),
            vec![vec![Some("23".to_string())]]
        );
        let named = compiled.named_captures("x123y").unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0]["rest"], Some("23".to_string()));
    }

    #[test]
    fn backreference_matches_repeated_text() {
        let word = CharClass::word().to_fragment().one_or_more().unwrap();
        let pattern = word
            .capture_as("first")
            .unwrap()
            .concat(" ")
            .concat(Fragment::backreference("first").unwrap());
        let compiled = compiled(&pattern);
        assert!(compiled.is_match("hey hey").unwrap());
        assert!(!compiled.is_full_match("hey you").unwrap());
    }

    #[test]
    fn lookbehind_compiles_and_matches() {
        let pattern = compiled(&Fragment::from("b").preceded_by("a").unwrap());
        assert_eq!(pattern.matches("ab cb").unwrap(), vec!["b"]);
    }

    // --- Replace and split ---

    #[test]
    fn replace_all_and_counted() {
        let pattern = compiled(&CharClass::digit().to_fragment());
        assert_eq!(pattern.replace("a1b2c3", "#", 0).unwrap(), "a#b#c#");
        assert_eq!(pattern.replace("a1b2c3", "#", 2).unwrap(), "a#b#c3");
    }

    #[test]
    fn split_by_match_drops_matched_parts() {
        let pattern = compiled(&Fragment::from(","));
        assert_eq!(
            pattern.split_by_match("a,b,,c").unwrap(),
            vec!["a", "b", "c"]
        );
    }

    // --- Grouping preserves language ---

    #[test]
    fn synthetic_grouping_does_not_change_the_language() {
        // `(?:a|b)c` must match exactly what `a|b` then `c` describes.
        let grouped = compiled(&Fragment::from("a").either("b").concat("c"));
        for subject in ["ac", "bc"] {
            assert!(grouped.is_full_match(subject).unwrap(), "{subject}");
        }
        for subject in ["a", "c", "abc", "ab"] {
            assert!(!grouped.is_full_match(subject).unwrap(), "{subject}");
        }
    }

    // --- Ready-made patterns against the real engine ---

    #[test]
    fn ready_patterns_match_expected_subjects() {
        let ip = compiled(&ready::ipv4().unwrap());
        assert!(ip.is_full_match("192.168.0.1").unwrap());
        assert!(ip.is_full_match("255.255.255.255").unwrap());
        assert!(!ip.is_full_match("256.1.1.1").unwrap());
        assert!(!ip.is_full_match("1.2.3").unwrap());

        let number = compiled(&ready::decimal().unwrap());
        assert!(number.is_full_match("-12.5").unwrap());
        assert!(!number.is_full_match("12.").unwrap());
    }

    // --- File subjects ---

    #[test]
    fn reads_subject_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("regal_matcher_subject_test.txt");
        std::fs::write(&path, "one 1 two 22").unwrap();
        let pattern = compiled(&CharClass::digit().to_fragment().one_or_more().unwrap());
        assert!(pattern.is_match_in_file(&path).unwrap());
        assert_eq!(pattern.matches_in_file(&path).unwrap(), vec!["1", "22"]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error = read_subject("/definitely/not/here.txt").unwrap_err();
        assert!(error.to_string().contains("/definitely/not/here.txt"));
    }
}
