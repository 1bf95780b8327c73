//! Ready-made fragments for single characters that are awkward to spell
//! inline, from control characters to currency signs.

use crate::fragment::Fragment;

/// A literal backslash `\`.
pub fn backslash() -> Fragment {
    Fragment::raw("\\\\")
}

/// A literal dollar sign `$`.
pub fn dollar() -> Fragment {
    Fragment::raw("\\$")
}

/// The newline character.
pub fn newline() -> Fragment {
    Fragment::raw("\n")
}

/// The carriage-return character.
pub fn carriage_return() -> Fragment {
    Fragment::raw("\r")
}

/// The horizontal-tab character.
pub fn tab() -> Fragment {
    Fragment::raw("\t")
}

/// The vertical-tab character.
pub fn vertical_tab() -> Fragment {
    Fragment::raw("\u{b}")
}

/// The form-feed character.
pub fn form_feed() -> Fragment {
    Fragment::raw("\u{c}")
}

/// A space character.
pub fn space() -> Fragment {
    Fragment::raw(" ")
}

/// The bullet character `•`.
pub fn bullet() -> Fragment {
    Fragment::raw("\u{2022}")
}

/// The white-bullet character `◦`.
pub fn white_bullet() -> Fragment {
    Fragment::raw("\u{25e6}")
}

/// The copyright sign `©`.
pub fn copyright() -> Fragment {
    Fragment::raw("\u{a9}")
}

/// The registered-trademark sign `®`.
pub fn registered() -> Fragment {
    Fragment::raw("\u{ae}")
}

/// The trademark sign `™`.
pub fn trademark() -> Fragment {
    Fragment::raw("\u{2122}")
}

/// The division sign `÷`.
pub fn division() -> Fragment {
    Fragment::raw("\u{f7}")
}

/// The multiplication sign `×`.
pub fn multiplication() -> Fragment {
    Fragment::raw("\u{d7}")
}

/// The infinity symbol `∞`.
pub fn infinity() -> Fragment {
    Fragment::raw("\u{221e}")
}

/// The euro sign `€`.
pub fn euro() -> Fragment {
    Fragment::raw("\u{20ac}")
}

/// The pound sign `£`.
pub fn pound() -> Fragment {
    Fragment::raw("\u{a3}")
}

/// The rupee sign `₹`.
pub fn rupee() -> Fragment {
    Fragment::raw("\u{20b9}")
}

/// The yen sign `¥`.
pub fn yen() -> Fragment {
    Fragment::raw("\u{a5}")
}
