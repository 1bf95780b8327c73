//! The immutable pattern fragment and its composition operators.
//!
//! A [`Fragment`] is rendered pattern text together with its semantic
//! [`Category`] and a quantifiability flag, both derived from the text by
//! [`classify`] at construction time and never stored out of sync with it.
//! Every operator consumes fragments by reference and returns a new value;
//! nothing here mutates.
//!
//! Before joining text, each operator consults the grouping policy for its
//! operands' categories and wraps them in a non-capturing group where the
//! policy demands it, so that composition never silently changes matching
//! semantics — only the spelling.

use std::fmt;
use std::ops::Add;

use crate::classify::{Category, classify, ends_with_exact_count};
use crate::error::{Error, Result};
use crate::escape::escape_literal;

/// An immutable, classified piece of rendered pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    category: Category,
    quantifiable: bool,
}

/// A repetition count for [`Fragment::quantify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// `?` — zero or one.
    Optional,
    /// `*` — zero or more.
    ZeroOrMore,
    /// `+` — one or more.
    OneOrMore,
    /// `{n}` — exactly `n`.
    Exactly(u32),
    /// `{n,}` — `n` or more.
    AtLeast(u32),
    /// `{,n}` — at most `n`.
    AtMost(u32),
    /// `{n,m}` — between `n` and `m` inclusive.
    Between(u32, u32),
}

/// Whether a quantifier matches as much as possible or as little.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Greed {
    #[default]
    Greedy,
    Lazy,
}

impl Greed {
    fn suffix(self) -> &'static str {
        match self {
            Greed::Greedy => "",
            Greed::Lazy => "?",
        }
    }
}

impl Fragment {
    /// The empty fragment, a no-op under every operator.
    pub fn empty() -> Self {
        Self::raw(String::new())
    }

    /// A fragment matching `text` as literal characters.
    pub fn literal(text: &str) -> Self {
        Self::raw(escape_literal(text))
    }

    /// Wrap already-rendered pattern text without escaping it.
    ///
    /// The text is classified as is; see the closed-world caveat on
    /// [`classify`].
    pub fn raw(text: impl Into<String>) -> Self {
        let text = text.into();
        let (category, quantifiable) = classify(&text);
        Fragment {
            text,
            category,
            quantifiable,
        }
    }

    /// The rendered pattern text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The semantic category of this fragment.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Whether this fragment may legally be repeated by a quantifier.
    pub fn is_quantifiable(&self) -> bool {
        self.quantifiable
    }

    // --- Operators ---

    /// Concatenate `other` onto the end of this fragment.
    ///
    /// Either operand is wrapped in a non-capturing group first when its
    /// category requires it; an empty operand leaves the other unchanged.
    pub fn concat(&self, other: impl Into<Fragment>) -> Fragment {
        let other = other.into();
        if other.category == Category::Empty {
            return self.clone();
        }
        if self.category == Category::Empty {
            return other;
        }
        Fragment::raw(format!("{}{}", self.concat_text(), other.concat_text()))
    }

    /// Concatenate `other` onto both sides of this fragment.
    pub fn enclose(&self, other: impl Into<Fragment>) -> Fragment {
        let enclosing = other.into();
        let enclosing = enclosing.concat_text();
        Fragment::raw(format!("{enclosing}{}{enclosing}", self.concat_text()))
    }

    /// Alternation: this fragment or `other`.
    ///
    /// Operands are joined with a bare `|` without pre-grouping —
    /// alternation is the lowest-precedence operator, so it binds
    /// everything to its left and right anyway. The result classifies as
    /// an alternation, which makes any later concatenation group it.
    pub fn either(&self, other: impl Into<Fragment>) -> Fragment {
        let other = other.into();
        if other.category == Category::Empty {
            return self.clone();
        }
        Fragment::raw(format!("{}|{}", self.text, other.text))
    }

    // --- Quantifiers ---

    /// Apply a repetition to this fragment.
    ///
    /// Degenerate counts normalize first (`{0}` yields the empty fragment,
    /// `{1}` yields the fragment unchanged, `{0,}` is `*`, `{1,}` is `+`,
    /// `{,1}` is `?`, `{n,n}` is `{n}`). A non-quantifiable fragment only
    /// admits [`Quantity::Optional`]; everything else fails with
    /// [`Error::CannotBeRepeated`].
    pub fn quantify(&self, quantity: Quantity, greed: Greed) -> Result<Fragment> {
        match quantity {
            Quantity::Optional => Ok(self.optional_with(greed)),
            Quantity::ZeroOrMore => self.repeat("*", greed),
            Quantity::OneOrMore => self.repeat("+", greed),
            Quantity::Exactly(0) | Quantity::AtMost(0) => Ok(Fragment::empty()),
            Quantity::Exactly(1) => Ok(self.clone()),
            Quantity::Exactly(n) => self.repeat_exact(n),
            Quantity::AtLeast(0) => self.repeat("*", greed),
            Quantity::AtLeast(1) => self.repeat("+", greed),
            Quantity::AtLeast(n) => self.repeat(&format!("{{{n},}}"), greed),
            Quantity::AtMost(1) => Ok(self.optional_with(greed)),
            Quantity::AtMost(n) => self.repeat(&format!("{{,{n}}}"), greed),
            Quantity::Between(min, max) if min > max => {
                Err(Error::InvalidRepeatBounds { min, max })
            }
            Quantity::Between(min, max) if min == max => self.quantify(Quantity::Exactly(min), greed),
            Quantity::Between(0, max) => self.quantify(Quantity::AtMost(max), greed),
            Quantity::Between(min, max) => self.repeat(&format!("{{{min},{max}}}"), greed),
        }
    }

    /// `?` — always permitted, even on non-repeatable assertions, since it
    /// needs no multi-repetition machinery.
    pub fn optional(&self) -> Fragment {
        self.optional_with(Greed::Greedy)
    }

    /// `*`
    pub fn zero_or_more(&self) -> Result<Fragment> {
        self.quantify(Quantity::ZeroOrMore, Greed::Greedy)
    }

    /// `+`
    pub fn one_or_more(&self) -> Result<Fragment> {
        self.quantify(Quantity::OneOrMore, Greed::Greedy)
    }

    /// `{n}`
    pub fn exactly(&self, n: u32) -> Result<Fragment> {
        self.quantify(Quantity::Exactly(n), Greed::Greedy)
    }

    /// `{n,}`
    pub fn at_least(&self, n: u32) -> Result<Fragment> {
        self.quantify(Quantity::AtLeast(n), Greed::Greedy)
    }

    /// `{,n}`
    pub fn at_most(&self, n: u32) -> Result<Fragment> {
        self.quantify(Quantity::AtMost(n), Greed::Greedy)
    }

    /// `{min,max}`
    pub fn between(&self, min: u32, max: u32) -> Result<Fragment> {
        self.quantify(Quantity::Between(min, max), Greed::Greedy)
    }

    fn optional_with(&self, greed: Greed) -> Fragment {
        if self.category == Category::Empty {
            return self.clone();
        }
        Fragment::raw(format!("{}?{}", self.quantify_text(), greed.suffix()))
    }

    fn repeat(&self, op: &str, greed: Greed) -> Result<Fragment> {
        if self.category == Category::Empty {
            return Ok(self.clone());
        }
        if !self.quantifiable {
            return Err(Error::CannotBeRepeated(self.text.clone()));
        }
        Ok(Fragment::raw(format!(
            "{}{op}{}",
            self.quantify_text(),
            greed.suffix()
        )))
    }

    fn repeat_exact(&self, n: u32) -> Result<Fragment> {
        if self.category == Category::Empty {
            return Ok(self.clone());
        }
        if !self.quantifiable {
            return Err(Error::CannotBeRepeated(self.text.clone()));
        }
        // Greed is meaningless for an exact count.
        Ok(Fragment::raw(format!("{}{{{n}}}", self.quantify_text())))
    }

    // --- Groups ---

    /// Wrap this fragment in a non-capturing group `(?:…)`.
    ///
    /// Applied to a group, this converts instead of wrapping: a capturing
    /// group loses its capturing syntax and name; an existing
    /// non-capturing group has its flags reset.
    pub fn group(&self) -> Fragment {
        self.group_with_flags("")
    }

    /// Wrap this fragment in a case-insensitive non-capturing group
    /// `(?i:…)`.
    pub fn group_case_insensitive(&self) -> Fragment {
        self.group_with_flags("i")
    }

    fn group_with_flags(&self, flags: &str) -> Fragment {
        if self.category == Category::Empty {
            return self.clone();
        }
        if self.category != Category::Group {
            return Fragment::raw(format!("(?{flags}:{})", self.text));
        }
        let text = self.text.as_str();
        let converted = if let Some(rest) = text.strip_prefix("(?P<") {
            // Strip the name from a named capturing group.
            match rest.find('>') {
                Some(end) => format!("(?:{}", &rest[end + 1..]),
                None => text.to_string(),
            }
        } else if text.starts_with("(?P") {
            // A backreference form; nothing to convert.
            text.to_string()
        } else if text.starts_with("(?") {
            // Reset flags on a non-capturing group; lookaround groups
            // pass through unchanged.
            match strip_group_opener(text) {
                Some(rest) => format!("(?{flags}:{rest}"),
                None => text.to_string(),
            }
        } else {
            // Convert a capturing group.
            format!("(?:{}", &text[1..])
        };
        Fragment::raw(converted)
    }

    /// Wrap this fragment in an unnamed capturing group.
    ///
    /// Applied to a capturing group this is a no-op; applied to a
    /// non-capturing group it converts it, unless the group carries flags,
    /// in which case the whole group is wrapped.
    pub fn capture(&self) -> Fragment {
        self.capture_with(None)
    }

    /// Wrap this fragment in a capturing group named `name`.
    ///
    /// Renames an already-named group. The name must be a word-character
    /// sequence starting with a non-digit.
    pub fn capture_as(&self, name: &str) -> Result<Fragment> {
        validate_group_name(name)?;
        Ok(self.capture_with(Some(name)))
    }

    fn capture_with(&self, name: Option<&str>) -> Fragment {
        if self.category == Category::Empty {
            return self.clone();
        }
        let text = self.text.as_str();
        let mut pattern = if self.category != Category::Group {
            match name {
                Some(name) => format!("(?P<{name}>{text})"),
                None => format!("({text})"),
            }
        } else if let Some(rest) = text.strip_prefix("(?:") {
            // Non-capturing group: drop the `?:`.
            format!("({rest}")
        } else if text.starts_with("(?i") {
            // A flagged group is captured as a whole.
            format!("({text})")
        } else {
            text.to_string()
        };
        if self.category == Category::Group
            && let Some(name) = name
        {
            pattern = if let Some(rest) = pattern.strip_prefix("(?P<") {
                match rest.find('>') {
                    Some(end) => format!("(?P<{name}>{}", &rest[end + 1..]),
                    None => pattern,
                }
            } else {
                format!("(?P<{name}>{})", &pattern[1..pattern.len() - 1])
            };
        }
        Fragment::raw(pattern)
    }

    /// A backreference `(?P=name)` matching the same text as the most
    /// recent match of the capturing group named `name`.
    pub fn backreference(name: &str) -> Result<Fragment> {
        validate_group_name(name)?;
        Ok(Fragment::raw(format!("(?P={name})")))
    }

    // --- Assertions ---

    /// `\b` — the position is a word boundary.
    pub fn word_boundary() -> Fragment {
        Fragment::raw("\\b")
    }

    /// `\B` — the position is not a word boundary.
    pub fn non_word_boundary() -> Fragment {
        Fragment::raw("\\B")
    }

    /// Match this fragment only at the start of the subject (`\A`).
    ///
    /// The result is a non-repeatable assertion.
    pub fn match_at_start(&self) -> Fragment {
        Fragment::raw(format!("\\A{}", self.assert_text()))
    }

    /// Match this fragment only at the end of the subject (`\z`).
    pub fn match_at_end(&self) -> Fragment {
        Fragment::raw(format!("{}\\z", self.assert_text()))
    }

    /// Match this fragment only at the start of a line (`^`; the multiline
    /// policy is always in force).
    pub fn match_at_line_start(&self) -> Fragment {
        Fragment::raw(format!("^{}", self.assert_text()))
    }

    /// Match this fragment only at the end of a line (`$`).
    pub fn match_at_line_end(&self) -> Fragment {
        Fragment::raw(format!("{}$", self.assert_text()))
    }

    /// Positive lookahead: this fragment, only when followed by
    /// `assertion`. An empty assertion is a no-op.
    pub fn followed_by(&self, assertion: impl Into<Fragment>) -> Fragment {
        let assertion = assertion.into();
        if assertion.category == Category::Empty {
            return self.clone();
        }
        Fragment::raw(format!("{}(?={})", self.assert_text(), assertion.text))
    }

    /// Positive lookbehind: this fragment, only when preceded by
    /// `assertion`, which must be fixed-width.
    pub fn preceded_by(&self, assertion: impl Into<Fragment>) -> Result<Fragment> {
        let assertion = assertion.into();
        if assertion.category == Category::Empty {
            return Ok(self.clone());
        }
        check_fixed_width(&assertion)?;
        Ok(Fragment::raw(format!(
            "(?<={}){}",
            assertion.text,
            self.assert_text()
        )))
    }

    /// Both [`preceded_by`](Self::preceded_by) and
    /// [`followed_by`](Self::followed_by) with the same assertion.
    pub fn enclosed_by(&self, assertion: impl Into<Fragment>) -> Result<Fragment> {
        let assertion = assertion.into();
        if assertion.category == Category::Empty {
            return Ok(self.clone());
        }
        check_fixed_width(&assertion)?;
        Ok(Fragment::raw(format!(
            "(?<={}){}(?={})",
            assertion.text,
            self.assert_text(),
            assertion.text
        )))
    }

    /// Negative lookahead: this fragment, only when *not* followed by
    /// `assertion`, which must not be empty.
    pub fn not_followed_by(&self, assertion: impl Into<Fragment>) -> Result<Fragment> {
        let assertion = assertion.into();
        if assertion.category == Category::Empty {
            return Err(Error::EmptyNegativeAssertion);
        }
        Ok(Fragment::raw(format!(
            "{}(?!{})",
            self.assert_text(),
            assertion.text
        )))
    }

    /// Negative lookbehind: this fragment, only when *not* preceded by
    /// `assertion`, which must be fixed-width and not empty.
    pub fn not_preceded_by(&self, assertion: impl Into<Fragment>) -> Result<Fragment> {
        let assertion = assertion.into();
        if assertion.category == Category::Empty {
            return Err(Error::EmptyNegativeAssertion);
        }
        check_fixed_width(&assertion)?;
        Ok(Fragment::raw(format!(
            "(?<!{}){}",
            assertion.text,
            self.assert_text()
        )))
    }

    /// Both [`not_preceded_by`](Self::not_preceded_by) and
    /// [`not_followed_by`](Self::not_followed_by) with the same assertion.
    pub fn not_enclosed_by(&self, assertion: impl Into<Fragment>) -> Result<Fragment> {
        let assertion = assertion.into();
        if assertion.category == Category::Empty {
            return Err(Error::EmptyNegativeAssertion);
        }
        check_fixed_width(&assertion)?;
        Ok(Fragment::raw(format!(
            "(?<!{}){}(?!{})",
            assertion.text,
            self.assert_text(),
            assertion.text
        )))
    }

    // --- Conditional grouping ---

    fn concat_text(&self) -> String {
        if self.category.group_on_concat() {
            self.group().text
        } else {
            self.text.clone()
        }
    }

    fn quantify_text(&self) -> String {
        if self.category.group_on_quantify() {
            self.group().text
        } else {
            self.text.clone()
        }
    }

    fn assert_text(&self) -> String {
        if self.category.group_on_assert() {
            self.group().text
        } else {
            self.text.clone()
        }
    }
}

/// Strip a `(?` + flags + `:` opener, returning the remainder.
fn strip_group_opener(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("(?")?;
    let rest = rest.trim_start_matches('i');
    rest.strip_prefix(':')
}

/// Lookbehind assertions require a fixed-width pattern: a quantified
/// assertion pattern is only acceptable when its suffix is an exact count.
fn check_fixed_width(assertion: &Fragment) -> Result<()> {
    if assertion.category() == Category::Quantifier && !ends_with_exact_count(assertion.as_str()) {
        return Err(Error::NonFixedWidthLookbehind(assertion.as_str().to_string()));
    }
    Ok(())
}

fn validate_group_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidGroupName(name.to_string()))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::literal(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::literal(&text)
    }
}

impl From<char> for Fragment {
    fn from(c: char) -> Self {
        Fragment::literal(&c.to_string())
    }
}

impl From<&Fragment> for Fragment {
    fn from(fragment: &Fragment) -> Self {
        fragment.clone()
    }
}

impl<T: Into<Fragment>> Add<T> for Fragment {
    type Output = Fragment;

    fn add(self, rhs: T) -> Fragment {
        self.concat(rhs)
    }
}

impl<T: Into<Fragment>> Add<T> for &Fragment {
    type Output = Fragment;

    fn add(self, rhs: T) -> Fragment {
        self.concat(rhs)
    }
}
