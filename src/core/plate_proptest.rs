//! Property-based tests for plate validation

#[cfg(test)]
mod tests {
    use crate::core::plate::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_plate()(
            letters in "[a-zA-Z]{3}",
            digits in "[0-9]{3}",
        ) -> String {
            format!("{letters}{digits}")
        }
    }

    proptest! {
        #[test]
        fn prop_valid_plates_accepted(plate in valid_plate()) {
            prop_assert!(is_valid_plate(&plate));
        }

        #[test]
        fn prop_six_char_strings_follow_the_rule(s in "[ -~]{6}") {
            let bytes = s.as_bytes();
            let expected = bytes[..3].iter().all(|b| b.is_ascii_alphabetic())
                && bytes[3..].iter().all(|b| b.is_ascii_digit());
            prop_assert_eq!(is_valid_plate(&s), expected);
        }

        #[test]
        fn prop_wrong_length_rejected(s in "[A-Za-z0-9]{0,12}") {
            prop_assume!(s.len() != PLATE_LENGTH);
            prop_assert!(!is_valid_plate(&s));
        }

        #[test]
        fn prop_parse_is_uppercase_and_idempotent(plate in valid_plate()) {
            let parsed = LicensePlate::parse(&plate).unwrap();
            prop_assert_eq!(parsed.as_str(), plate.to_ascii_uppercase());
            let reparsed = LicensePlate::parse(parsed.as_str()).unwrap();
            prop_assert_eq!(parsed, reparsed);
        }

        #[test]
        fn prop_validation_never_panics(s in ".*") {
            let _ = is_valid_plate(&s);
            let _ = LicensePlate::parse(&s);
        }
    }
}
