use pricebot::clean_response;
use pricebot::units::{Money, Quantity, Unit};
use proptest::prelude::*;

// Property: unit parsing never panics on arbitrary input
proptest! {
    #[test]
    fn prop_parse_basis_no_panic(s in "(?s).*") {
        let _ = Quantity::parse_basis(&s);
        let _ = Unit::parse(&s);
    }

    #[test]
    fn prop_clean_response_no_panic(s in "(?s).*") {
        let cleaned = clean_response(&s);
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }
}

proptest! {
    #[test]
    fn prop_parsed_basis_is_positive(value in 1u32..10_000, unit in prop::sample::select(vec!["g", "kg", "ml", "liter", "pcs", "dozen", "packet"])) {
        let text = format!("{value} {unit}");
        let basis = Quantity::parse_basis(&text).unwrap();
        prop_assert!(basis.base() > 0.0);
        prop_assert_eq!(basis.value, f64::from(value));
    }

    #[test]
    fn prop_think_blocks_are_removed(reasoning in "[a-z ]{0,40}", answer in "[A-Za-z0-9]{1,20}") {
        let text = format!("<think>{reasoning}</think>\n\n\n\n{answer}");
        prop_assert_eq!(clean_response(&text), answer);
    }

    #[test]
    fn prop_money_display_round_trips(minor in -10_000_000i64..10_000_000) {
        let shown = Money(minor).display("INR");
        let digits: String = shown.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        let major: f64 = digits.parse().unwrap();
        prop_assert_eq!(Money::from_major(major), Money(minor.abs()));
        prop_assert_eq!(shown.starts_with('-'), minor < 0);
    }
}
