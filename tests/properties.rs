//! Algebraic laws of the pattern algebra, checked over generated values,
//! plus the concrete end-to-end scenarios exercised through the public API.

use proptest::prelude::*;

use regal::{Category, CharClass, Error, Fragment, classify};

/// Classes built from printable-ASCII intervals, combined by union.
fn class_strategy() -> impl Strategy<Value = CharClass> {
    prop::collection::vec((0u8..94, 0u8..94), 1..4).prop_map(|pairs| {
        let mut class: Option<CharClass> = None;
        for (a, b) in pairs {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (lo, hi) = ((b' ' + lo) as char, (b' ' + hi) as char);
            let piece = if lo == hi {
                CharClass::from(lo)
            } else {
                CharClass::between(lo, hi).expect("lo < hi")
            };
            class = Some(match class {
                None => piece,
                Some(built) => built.union(&piece).expect("same polarity"),
            });
        }
        class.expect("at least one interval")
    })
}

/// Fragments built from the algebra's own operators. Anchored assertions
/// are excluded so every generated fragment stays quantifiable.
fn fragment_strategy() -> impl Strategy<Value = Fragment> {
    let leaf = prop_oneof![
        "[a-z]{1,3}".prop_map(|s| Fragment::from(s.as_str())),
        Just(Fragment::raw("\\d")),
        Just(Fragment::empty()),
    ];
    leaf.prop_recursive(3, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.concat(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.either(b)),
            inner.clone().prop_map(|a| a.optional()),
            (inner.clone(), 2u32..5).prop_map(|(a, n)| a.exactly(n).expect("quantifiable")),
            inner.clone().prop_map(|a| a.group()),
            inner.prop_map(|a| a.capture()),
        ]
    })
}

proptest! {
    // --- Union ---

    #[test]
    fn union_is_commutative(x in class_strategy(), y in class_strategy()) {
        prop_assert_eq!(x.union(&y).unwrap(), y.union(&x).unwrap());
    }

    #[test]
    fn union_is_idempotent(x in class_strategy()) {
        prop_assert_eq!(x.union(&x).unwrap(), x);
    }

    #[test]
    fn union_is_set_union(x in class_strategy(), y in class_strategy(), c in 0u8..94) {
        let c = (b' ' + c) as char;
        let union = x.union(&y).unwrap();
        prop_assert_eq!(union.matches(c), x.matches(c) || y.matches(c));
    }

    // --- Subtraction ---

    #[test]
    fn self_subtraction_empties(x in class_strategy()) {
        prop_assert_eq!(x.subtract(&x).unwrap_err(), Error::EmptyClass);
    }

    #[test]
    fn subtraction_is_set_difference(x in class_strategy(), y in class_strategy(), c in 0u8..94) {
        let c = (b' ' + c) as char;
        if let Ok(difference) = x.subtract(&y) {
            prop_assert_eq!(difference.matches(c), x.matches(c) && !y.matches(c));
        }
    }

    // --- Negation ---

    #[test]
    fn negation_is_involutive(x in class_strategy()) {
        prop_assert_eq!(x.negate().unwrap().negate().unwrap(), x);
    }

    #[test]
    fn negation_flips_membership(x in class_strategy(), c in 0u8..94) {
        let c = (b' ' + c) as char;
        prop_assert_eq!(x.negate().unwrap().matches(c), !x.matches(c));
    }

    // --- Classification ---

    #[test]
    fn classification_is_idempotent(p in fragment_strategy()) {
        let (category, quantifiable) = classify(p.as_str());
        prop_assert_eq!(category, p.category());
        prop_assert_eq!(quantifiable, p.is_quantifiable());
    }

    #[test]
    fn rendered_text_round_trips(p in fragment_strategy()) {
        let rebuilt = Fragment::raw(p.to_string());
        prop_assert_eq!(rebuilt, p);
    }

    #[test]
    fn rendered_classes_classify_as_class_or_token(x in class_strategy()) {
        let fragment = x.to_fragment();
        prop_assert!(matches!(
            fragment.category(),
            Category::Class | Category::Token
        ));
        prop_assert!(fragment.is_quantifiable());
    }
}

// --- Concrete scenarios ---

#[test]
fn union_of_letter_and_digit_ranges() {
    let union = CharClass::between('a', 'z')
        .unwrap()
        .union(&CharClass::between('0', '9').unwrap())
        .unwrap();
    // Set equality against the same class built in one step, not a byte
    // comparison of rendered text.
    let expected = CharClass::between('0', '9')
        .unwrap()
        .union(&CharClass::between('a', 'z').unwrap())
        .unwrap();
    assert_eq!(union, expected);
    for c in ['a', 'q', 'z', '0', '9'] {
        assert!(union.matches(c));
    }
    assert!(!union.matches('A'));
}

#[test]
fn subtracting_one_character_splits_the_range() {
    let class = CharClass::between('a', 'z')
        .unwrap()
        .subtract(&CharClass::from('c'))
        .unwrap();
    assert!(class.matches('a'));
    assert!(class.matches('b'));
    assert!(!class.matches('c'));
    assert!(class.matches('d'));
    assert!(class.matches('z'));
}

#[test]
fn double_negation_restores_the_class() {
    let class = CharClass::between('a', 'z').unwrap();
    assert_eq!(class.negate().unwrap().negate().unwrap(), class);
}

#[test]
fn concat_of_alternation_renders_grouped() {
    let pattern = Fragment::from("a").either("b").concat("c");
    assert_eq!(pattern.to_string(), "(?:a|b)c");
}

#[test]
fn exact_quantifier_renders_counted() {
    let pattern = Fragment::from("a").exactly(3).unwrap();
    assert_eq!(pattern.to_string(), "a{3}");
}

#[test]
fn quantifying_an_anchored_assertion_fails() {
    let assertion = Fragment::from("a").match_at_start();
    assert!(matches!(
        assertion.exactly(2),
        Err(Error::CannotBeRepeated(_))
    ));
}
