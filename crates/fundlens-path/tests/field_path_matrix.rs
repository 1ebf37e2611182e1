use fundlens_path::{parse_field_path, validate_field_path, FieldPath, PathError};

#[test]
fn path_parse_format_roundtrip_matrix() {
    let cases = [
        "fund_name",
        "fees.management_fee",
        "fees.subscription_fee",
        "report.period.end_date",
        "a~b.c/d",
    ];

    for path in cases {
        let parsed = FieldPath::parse(path).expect("valid path");
        assert_eq!(parsed.to_string(), path);
    }
}

#[test]
fn path_rejection_matrix() {
    let cases = [
        ("", PathError::Empty),
        (".", PathError::EmptySegment { index: 0 }),
        (".fees", PathError::EmptySegment { index: 0 }),
        ("fees.", PathError::EmptySegment { index: 1 }),
        ("fees..management_fee", PathError::EmptySegment { index: 1 }),
    ];

    for (path, expected) in cases {
        assert_eq!(validate_field_path(path), Err(expected.clone()), "{path:?}");
        assert_eq!(FieldPath::parse(path), Err(expected.clone()), "{path:?}");
        assert_eq!(parse_field_path(path), Err(expected), "{path:?}");
    }
}

#[test]
fn path_serde_uses_dotted_form() {
    let path = FieldPath::parse("fees.management_fee").unwrap();
    let encoded = serde_json::to_string(&path).unwrap();
    assert_eq!(encoded, "\"fees.management_fee\"");

    let decoded: FieldPath = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, path);

    let invalid: Result<FieldPath, _> = serde_json::from_str("\"fees..x\"");
    assert!(invalid.is_err());
}

#[test]
fn path_relationships() {
    let fees = FieldPath::parse("fees").unwrap();
    let fee = FieldPath::parse("fees.management_fee").unwrap();
    assert!(fee.is_child_of(&fees));
    assert_eq!(fee.parent(), Some(fees.clone()));
    assert_eq!(fees.join("management_fee").unwrap(), fee);
}
