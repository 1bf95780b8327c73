//! The character-class set algebra.
//!
//! A [`CharClass`] is the semantic form of a bracket expression: a set of
//! inclusive code-point ranges plus singleton characters, and a polarity
//! flag. The representation is always kept canonical:
//!
//! - ranges are pairwise disjoint and non-adjacent (touching or overlapping
//!   ranges are merged),
//! - no singleton lies inside or directly next to a stored range,
//! - a run of exactly two code points is kept as two singletons, and a run
//!   of one as a single character.
//!
//! Union, subtraction and negation all operate on this canonical set form
//! and produce new canonical values, so equality of classes is equality of
//! the sets they denote, regardless of how they were built.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::escape::{escape_literal, push_class_char};
use crate::fragment::Fragment;

/// Expansion of the word shorthand `\w` (the engine's word class is
/// open-ended beyond this; see [`CharClass::word_unicode`]).
const WORD_SET: &[(char, char)] = &[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')];

/// Expansion of the digit shorthand `\d`.
const DIGIT_SET: &[(char, char)] = &[('0', '9')];

/// Expansion of the whitespace shorthand `\s`.
const WHITESPACE_SET: &[(char, char)] = &[('\t', '\r'), (' ', ' ')];

/// A character class in canonical set form.
#[derive(Debug, Clone)]
pub struct CharClass {
    /// Canonical ranges, sorted, each spanning at least three code points.
    ranges: Vec<(char, char)>,
    /// Singleton characters not inside or adjacent to any range.
    chars: BTreeSet<char>,
    /// `[^…]` rather than `[…]`.
    negated: bool,
    /// Word-shorthand folding was explicitly requested by an operand.
    fold_word: bool,
    /// The open-ended word class; subtraction from it is refused.
    word_guard: bool,
    /// The universal any-character class `.`, which has no bracket form.
    universal: bool,
}

impl CharClass {
    /// The universal class: any character, including the newline.
    pub fn any() -> Self {
        CharClass {
            ranges: Vec::new(),
            chars: BTreeSet::new(),
            negated: false,
            fold_word: false,
            word_guard: false,
            universal: true,
        }
    }

    /// Any character of the Latin alphabet, either case.
    pub fn letter() -> Self {
        Self::from_intervals(vec![('A', 'Z'), ('a', 'z')], false, false, false)
    }

    /// Any lowercase character of the Latin alphabet.
    pub fn lowercase() -> Self {
        Self::from_intervals(vec![('a', 'z')], false, false, false)
    }

    /// Any uppercase character of the Latin alphabet.
    pub fn uppercase() -> Self {
        Self::from_intervals(vec![('A', 'Z')], false, false, false)
    }

    /// Any decimal digit.
    pub fn digit() -> Self {
        Self::from_intervals(DIGIT_SET.to_vec(), false, false, false)
    }

    /// Any ASCII word character: alphanumeric or underscore.
    pub fn word() -> Self {
        Self::from_intervals(WORD_SET.to_vec(), false, false, false)
    }

    /// The open-ended word class: renders as `\w`, matching word characters
    /// of every alphabet the engine knows.
    ///
    /// Because the set is open-ended, a finite subtraction cannot soundly
    /// narrow it; subtracting from this class fails with
    /// [`Error::GlobalWordClassSubtraction`].
    pub fn word_unicode() -> Self {
        Self::from_intervals(WORD_SET.to_vec(), false, true, true)
    }

    /// Any whitespace character.
    pub fn whitespace() -> Self {
        Self::from_intervals(WHITESPACE_SET.to_vec(), false, false, false)
    }

    /// Any ASCII punctuation character.
    pub fn punctuation() -> Self {
        Self::from_intervals(
            vec![('!', '/'), (':', '@'), ('[', '`'), ('{', '~')],
            false,
            false,
            false,
        )
    }

    /// Any character in the inclusive range `start..=end`.
    ///
    /// Fails with [`Error::InvalidRange`] unless `start` precedes `end` in
    /// code-point order.
    pub fn between(start: char, end: char) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRange(start, end));
        }
        Ok(Self::from_intervals(vec![(start, end)], false, false, false))
    }

    /// Any one of the provided characters.
    ///
    /// Fails with [`Error::NotEnoughOperands`] when no characters are given.
    pub fn any_of<I>(chars: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let items: Vec<(char, char)> = chars.into_iter().map(|c| (c, c)).collect();
        if items.is_empty() {
            return Err(Error::NotEnoughOperands {
                required: 1,
                provided: 0,
            });
        }
        Ok(Self::from_intervals(items, false, false, false))
    }

    /// Whether this is a negated (`[^…]`) class.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Test whether `ch` is matched by this class.
    pub fn matches(&self, ch: char) -> bool {
        if self.universal {
            return true;
        }
        let base = self.chars.contains(&ch)
            || self.ranges.iter().any(|&(lo, hi)| lo <= ch && ch <= hi);
        if self.negated { !base } else { base }
    }

    /// The union of two classes of equal polarity.
    ///
    /// The result folds to the `\w` shorthand only if at least one operand
    /// requested word folding; `\d` and `\s` are closed expansions, so they
    /// fold whenever covered.
    pub fn union(&self, other: &CharClass) -> Result<CharClass> {
        if self.negated != other.negated {
            return Err(Error::CannotBeUnioned);
        }
        if self.universal || other.universal {
            return Ok(CharClass::any());
        }
        let mut items = self.intervals();
        items.extend(other.intervals());
        Ok(Self::from_intervals(
            items,
            self.negated,
            self.fold_word || other.fold_word,
            false,
        ))
    }

    /// The difference of two classes of equal polarity.
    ///
    /// Subtracting the universal class empties any class; subtracting
    /// *from* the universal class yields the negation of the subtrahend.
    pub fn subtract(&self, other: &CharClass) -> Result<CharClass> {
        if self.negated != other.negated {
            return Err(Error::CannotBeSubtracted);
        }
        if other.universal {
            return Err(Error::EmptyClass);
        }
        if self.universal {
            return other.negate();
        }
        if self.word_guard {
            return Err(Error::GlobalWordClassSubtraction);
        }
        let remaining = subtract_intervals(&self.intervals(), &other.intervals());
        if remaining.is_empty() {
            return Err(Error::EmptyClass);
        }
        Ok(Self::from_intervals(remaining, self.negated, false, false))
    }

    /// Flip the polarity. The enumerated content is unchanged, since
    /// `[^…]` is the complement of the same set.
    ///
    /// The universal class cannot be negated: it has no bracket form.
    pub fn negate(&self) -> Result<CharClass> {
        if self.universal {
            return Err(Error::CannotBeNegated);
        }
        let mut negated = self.clone();
        negated.negated = !self.negated;
        Ok(negated)
    }

    /// Render this class into a pattern fragment, applying the
    /// single-character and shorthand pretty-printing rules.
    pub fn to_fragment(&self) -> Fragment {
        Fragment::raw(self.render())
    }

    /// Canonical rendered text of this class.
    fn render(&self) -> String {
        if self.universal {
            return ".".to_string();
        }

        let mut remaining = self.intervals();
        let mut shorthands: Vec<&'static str> = Vec::new();
        // The word fold consumes the digits, so the two are exclusive.
        if self.fold_word && covers(&remaining, WORD_SET) {
            remaining = subtract_intervals(&remaining, WORD_SET);
            shorthands.push("\\w");
        } else if covers(&remaining, DIGIT_SET) {
            remaining = subtract_intervals(&remaining, DIGIT_SET);
            shorthands.push("\\d");
        }
        if covers(&remaining, WHITESPACE_SET) {
            remaining = subtract_intervals(&remaining, WHITESPACE_SET);
            shorthands.push("\\s");
        }

        let (ranges, chars) = canonicalize(remaining);

        // A class reduced to one bare character renders as a literal.
        if !self.negated
            && shorthands.is_empty()
            && ranges.is_empty()
            && chars.len() == 1
            && let Some(&c) = chars.iter().next()
        {
            return escape_literal(&c.to_string());
        }
        // A single shorthand needs no brackets; its negation has its own
        // spelling (`[^\w]` is `\W`).
        if shorthands.len() == 1 && ranges.is_empty() && chars.is_empty() {
            let shorthand = shorthands[0];
            return if self.negated {
                shorthand.to_ascii_uppercase()
            } else {
                shorthand.to_string()
            };
        }

        let mut out = String::from(if self.negated { "[^" } else { "[" });
        for shorthand in shorthands {
            out.push_str(shorthand);
        }
        // Interleave ranges and singletons in code-point order.
        let mut pieces: Vec<(char, Option<char>)> = ranges
            .iter()
            .map(|&(lo, hi)| (lo, Some(hi)))
            .chain(chars.iter().map(|&c| (c, None)))
            .collect();
        pieces.sort();
        for (lo, hi) in pieces {
            push_class_char(&mut out, lo);
            if let Some(hi) = hi {
                out.push('-');
                push_class_char(&mut out, hi);
            }
        }
        out.push(']');
        out
    }

    /// The canonical content as a flat, sorted interval list (singletons
    /// become unit intervals).
    fn intervals(&self) -> Vec<(char, char)> {
        self.ranges
            .iter()
            .copied()
            .chain(self.chars.iter().map(|&c| (c, c)))
            .sorted()
            .collect()
    }

    fn from_intervals(
        items: Vec<(char, char)>,
        negated: bool,
        fold_word: bool,
        word_guard: bool,
    ) -> Self {
        let (ranges, chars) = canonicalize(items);
        CharClass {
            ranges,
            chars,
            negated,
            fold_word,
            word_guard,
            universal: false,
        }
    }
}

/// Classes are equal when they denote the same set with the same polarity.
/// Rendering preferences (word folding) do not take part in equality.
impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        self.universal == other.universal
            && self.negated == other.negated
            && self.ranges == other.ranges
            && self.chars == other.chars
    }
}

impl Eq for CharClass {}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<char> for CharClass {
    fn from(c: char) -> Self {
        CharClass::from_intervals(vec![(c, c)], false, false, false)
    }
}

impl From<CharClass> for Fragment {
    fn from(class: CharClass) -> Self {
        class.to_fragment()
    }
}

impl From<&CharClass> for Fragment {
    fn from(class: &CharClass) -> Self {
        class.to_fragment()
    }
}

/// Largest valid char strictly below `c`.
fn char_before(c: char) -> Option<char> {
    let n = u32::from(c).checked_sub(1)?;
    let n = if (0xD800..=0xDFFF).contains(&n) { 0xD7FF } else { n };
    char::from_u32(n)
}

/// Smallest valid char strictly above `c`.
fn char_after(c: char) -> Option<char> {
    let n = u32::from(c) + 1;
    let n = if (0xD800..=0xDFFF).contains(&n) { 0xE000 } else { n };
    char::from_u32(n)
}

/// Number of valid code points in `lo..=hi`.
fn span(lo: char, hi: char) -> u32 {
    let mut n = u32::from(hi) - u32::from(lo) + 1;
    if u32::from(lo) < 0xD800 && u32::from(hi) > 0xDFFF {
        n -= 0x800;
    }
    n
}

/// Merge an arbitrary interval list into canonical form: overlapping and
/// touching intervals coalesce; runs of one or two code points demote to
/// singleton characters.
fn canonicalize(items: Vec<(char, char)>) -> (Vec<(char, char)>, BTreeSet<char>) {
    let merged = items.into_iter().sorted().coalesce(|a, b| {
        let touches = match char_after(a.1) {
            Some(next) => b.0 <= next,
            None => true,
        };
        if touches {
            Ok((a.0, a.1.max(b.1)))
        } else {
            Err((a, b))
        }
    });

    let mut ranges = Vec::new();
    let mut chars = BTreeSet::new();
    for (lo, hi) in merged {
        match span(lo, hi) {
            1 => {
                chars.insert(lo);
            }
            2 => {
                chars.insert(lo);
                chars.insert(hi);
            }
            _ => ranges.push((lo, hi)),
        }
    }
    (ranges, chars)
}

/// Whether every interval of `set` is fully covered by `intervals`.
///
/// `intervals` must be coalesced, so a covered multi-point interval is
/// necessarily contained in a single entry.
fn covers(intervals: &[(char, char)], set: &[(char, char)]) -> bool {
    set.iter()
        .all(|&(lo, hi)| intervals.iter().any(|&(ilo, ihi)| ilo <= lo && hi <= ihi))
}

/// Remove every code point of `subtrahend` from `minuend`, splitting
/// intervals as needed.
fn subtract_intervals(minuend: &[(char, char)], subtrahend: &[(char, char)]) -> Vec<(char, char)> {
    let mut out = Vec::new();
    for &(lo, hi) in minuend {
        let mut pieces = vec![(lo, hi)];
        for &(slo, shi) in subtrahend {
            let mut next = Vec::new();
            for (plo, phi) in pieces {
                if shi < plo || slo > phi {
                    next.push((plo, phi));
                    continue;
                }
                if slo > plo
                    && let Some(end) = char_before(slo)
                {
                    next.push((plo, end));
                }
                if shi < phi
                    && let Some(start) = char_after(shi)
                {
                    next.push((start, phi));
                }
            }
            pieces = next;
        }
        out.extend(pieces);
    }
    out
}
