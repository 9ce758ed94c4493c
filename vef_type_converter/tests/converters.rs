use vef_type_converter::{ConversionError, Scalar, TypeConverter, ValueType};

#[test]
fn test_convert_routes_by_target_type() {
    let cases = [
        ("7", ValueType::Integer, Scalar::Integer(7)),
        ("7", ValueType::Float, Scalar::Float(7.0)),
        ("7", ValueType::String, Scalar::String("7".into())),
        ("yes", ValueType::Boolean, Scalar::Boolean(true)),
    ];
    for (raw, target, expected) in cases {
        assert_eq!(TypeConverter::convert(raw, target).unwrap(), expected);
    }
}

#[test]
fn test_invalid_integer_reports_value_and_target() {
    let err = TypeConverter::convert("abc", ValueType::Integer).unwrap_err();
    match err {
        ConversionError::Invalid { value, target, .. } => {
            assert_eq!(value, "abc");
            assert_eq!(target, ValueType::Integer);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_pair_keeps_submitted_order() {
    let (low, high) = TypeConverter::convert_pair("90,10", ValueType::Integer).unwrap();
    assert_eq!(low, Scalar::Integer(90));
    assert_eq!(high, Scalar::Integer(10));
}

#[test]
fn test_pair_with_wrong_arity_fails() {
    let err = TypeConverter::convert_pair("1,2,3", ValueType::Float).unwrap_err();
    assert!(matches!(err, ConversionError::PartCount { found: 3, .. }));
}
