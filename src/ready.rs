//! A small catalog of ready-made patterns, assembled purely from the
//! public algebra. These are clients of the core operators, not part of
//! them; anything here could equally live in caller code.

use crate::class::CharClass;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::ops;

/// A whole word: one or more word characters between word boundaries.
pub fn word() -> Result<Fragment> {
    let body = CharClass::word_unicode().to_fragment().one_or_more()?;
    ops::enclose(body, [Fragment::word_boundary()])
}

/// A whole word of `min..=max` characters.
pub fn word_of_length(min: u32, max: u32) -> Result<Fragment> {
    let body = CharClass::word_unicode().to_fragment().between(min, max)?;
    ops::enclose(body, [Fragment::word_boundary()])
}

/// An unsigned base-10 integer with no leading zero.
pub fn unsigned_integer() -> Result<Fragment> {
    let digits = CharClass::digit().to_fragment();
    let nonzero = CharClass::between('1', '9')?
        .to_fragment()
        .concat(digits.zero_or_more()?);
    Ok(Fragment::from("0").either(nonzero))
}

/// An optionally signed base-10 integer with no leading zero.
pub fn integer() -> Result<Fragment> {
    let sign = Fragment::from("+").either("-").optional();
    Ok(sign.concat(unsigned_integer()?))
}

/// An optionally signed decimal number with a mandatory fraction part.
pub fn decimal() -> Result<Fragment> {
    let fraction = CharClass::digit().to_fragment().one_or_more()?;
    Ok(integer()?.concat(".").concat(fraction))
}

/// A dotted-quad IPv4 address with octets in `0..=255`.
pub fn ipv4() -> Result<Fragment> {
    let digit = CharClass::digit().to_fragment();
    let octet = ops::either([
        Fragment::from("25").concat(CharClass::between('0', '5')?),
        Fragment::from("2")
            .concat(CharClass::between('0', '4')?)
            .concat(&digit),
        Fragment::from("1").concat(digit.exactly(2)?),
        CharClass::between('1', '9')?
            .to_fragment()
            .optional()
            .concat(&digit),
    ])?;
    let tail = Fragment::from(".").concat(&octet).exactly(3)?;
    Ok(octet.concat(tail))
}
