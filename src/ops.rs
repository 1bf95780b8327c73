//! N-ary composition operators.
//!
//! These are thin folds over the binary operators on [`Fragment`], with the
//! operand-count validation that variadic call sites need.

use crate::error::{Error, Result};
use crate::fragment::Fragment;

/// Concatenate two or more fragments in order.
pub fn concat<I>(fragments: I) -> Result<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Fragment>,
{
    let mut fragments = collect(fragments);
    if fragments.len() < 2 {
        return Err(Error::NotEnoughOperands {
            required: 2,
            provided: fragments.len(),
        });
    }
    let mut result = fragments.remove(0);
    for fragment in fragments {
        result = result.concat(fragment);
    }
    Ok(result)
}

/// Match either one of two or more fragments.
///
/// The regex engine stops at the first alternative that matches, scanning
/// left to right, so order the likeliest alternative first.
pub fn either<I>(fragments: I) -> Result<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Fragment>,
{
    let mut fragments = collect(fragments);
    if fragments.len() < 2 {
        return Err(Error::NotEnoughOperands {
            required: 2,
            provided: fragments.len(),
        });
    }
    let mut result = fragments.remove(0);
    for fragment in fragments {
        result = result.either(fragment);
    }
    Ok(result)
}

/// Concatenate one or more enclosing fragments onto both sides of `inner`,
/// innermost first.
pub fn enclose<I>(inner: impl Into<Fragment>, enclosing: I) -> Result<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Fragment>,
{
    let enclosing = collect(enclosing);
    if enclosing.is_empty() {
        return Err(Error::NotEnoughOperands {
            required: 1,
            provided: 0,
        });
    }
    let mut result = inner.into();
    for fragment in enclosing {
        result = result.enclose(fragment);
    }
    Ok(result)
}

fn collect<I>(fragments: I) -> Vec<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Fragment>,
{
    fragments.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_folds_left_to_right() {
        let pattern = concat(["a", "b", "c"]).unwrap();
        assert_eq!(pattern.to_string(), "abc");
    }

    #[test]
    fn concat_groups_alternation_operands() {
        let alternation = Fragment::from("a").either("b");
        let pattern = concat([alternation, Fragment::from("c")]).unwrap();
        assert_eq!(pattern.to_string(), "(?:a|b)c");
    }

    #[test]
    fn either_joins_all_alternatives() {
        let pattern = either(["a", "b", "c"]).unwrap();
        assert_eq!(pattern.to_string(), "a|b|c");
    }

    #[test]
    fn enclose_wraps_innermost_first() {
        let pattern = enclose("a", ["'", "\""]).unwrap();
        assert_eq!(pattern.to_string(), "\"'a'\"");
    }

    #[test]
    fn too_few_operands_fail() {
        assert_eq!(
            concat(["a"]).unwrap_err(),
            Error::NotEnoughOperands {
                required: 2,
                provided: 1
            }
        );
        assert_eq!(
            either(Vec::<Fragment>::new()).unwrap_err(),
            Error::NotEnoughOperands {
                required: 2,
                provided: 0
            }
        );
        assert!(matches!(
            enclose("a", Vec::<Fragment>::new()),
            Err(Error::NotEnoughOperands { .. })
        ));
    }
}
