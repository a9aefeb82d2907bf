use booking_model::{validate_text, BookingError};

#[test]
fn test_letter_and_space_values_pass() {
    for value in ["Ana", "Ana Maria", "Lopez Garcia", "Zoë", "  Li  "] {
        assert!(validate_text("first_name", value).is_ok(), "{:?} should pass", value);
    }
}

#[test]
fn test_values_with_digits_or_symbols_fail_naming_the_field() {
    for value in ["Ana1", "4na", "Ana_Maria", "Ana.", "A+B", "José!"] {
        let err = validate_text("last_name", value).unwrap_err();
        match &err {
            BookingError::ValidationError { field, .. } => assert_eq!(field, "last_name"),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(err.to_string(), "Validation error: last_name must contain only letters");
    }
}
