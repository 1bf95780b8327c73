//! Compose regular expressions from typed building blocks.
//!
//! Instead of hand-writing pattern text, callers assemble patterns from
//! literals, character classes, quantifiers, groups and assertions. Every
//! operator classifies its operands and inserts non-capturing groups
//! exactly where precedence demands them, so composition never silently
//! changes what a pattern matches.
//!
//! # Example
//!
//! ```rust
//! use regal::{CharClass, Fragment};
//!
//! // (?:a|b)c — the alternation is grouped before concatenation.
//! let pattern = Fragment::from("a").either("b").concat("c");
//! assert_eq!(pattern.to_string(), "(?:a|b)c");
//!
//! // Character classes form a set algebra.
//! let id_start = CharClass::letter().union(&CharClass::from('_'))?;
//! let id_rest = id_start.union(&CharClass::digit())?;
//! let identifier = id_start.to_fragment().concat(id_rest.to_fragment().zero_or_more()?);
//! assert_eq!(identifier.to_string(), "[A-Z_a-z][\\dA-Z_a-z]*");
//!
//! // Matching always runs under multiline + dot-matches-newline.
//! let compiled = identifier.compile()?;
//! assert!(compiled.is_full_match("snake_case_99")?);
//! assert!(!compiled.is_match("  !!  ")?);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Pattern categories
//!
//! Every fragment carries a [`Category`] derived from its rendered text:
//!
//! | Category      | Example        | Grouped when…                      |
//! |---------------|----------------|------------------------------------|
//! | `Empty`       | ``             | never                              |
//! | `Token`       | `a`, `\$`      | never                              |
//! | `Class`       | `[a-z]`, `\d`  | never                              |
//! | `Group`       | `(?:ab)`       | never                              |
//! | `Assertion`   | `\Aab`         | quantified                         |
//! | `Quantifier`  | `a+`           | quantified                         |
//! | `Other`       | `ab`           | quantified                         |
//! | `Alternation` | `a\|b`         | concatenated, quantified, asserted |
//!
//! The classifier is sound for text the algebra itself produced; feeding
//! arbitrary external regex syntax through [`Fragment::raw`] is outside
//! its contract.

mod class;
mod classify;
mod error;
mod escape;
mod fragment;
pub mod matcher;
pub mod ops;
pub mod ready;
pub mod tokens;

pub use class::CharClass;
pub use classify::{Category, classify};
pub use error::{Error, Result};
pub use escape::escape_literal;
pub use fragment::{Fragment, Greed, Quantity};
pub use matcher::{CompiledPattern, read_subject};
