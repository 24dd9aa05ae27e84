use structdiff::{
    Argument, DiffError, FormatError, IntrospectError, Shape, ShapeError, TemplateError,
};

#[test]
fn test_unsupported_names_argument() {
    let err = ShapeError::unsupported(Argument::After, Shape::Atomic);
    assert!(err.to_string().contains("\"after\""));
    assert!(err.to_string().contains("atomic"));
}

#[test]
fn test_type_mismatch_display() {
    let err = ShapeError::type_mismatch("Config", "NotConfig");
    assert_eq!(
        err.to_string(),
        "records are of different types: Config and NotConfig"
    );
}

#[test]
fn test_template_error_display() {
    let err = TemplateError::unmatched_close("a}", 1);
    assert_eq!(
        err.to_string(),
        "template \"a}\" has an unmatched '}' at byte 1"
    );

    let err = TemplateError::empty_placeholder("{}", 0);
    assert!(err.to_string().contains("empty placeholder"));
}

#[test]
fn test_diff_error_is_transparent() {
    let inner = TemplateError::unknown_placeholder("{X}", "X");
    let err: DiffError = inner.clone().into();
    assert!(matches!(err, DiffError::Template(_)));
    assert_eq!(err.to_string(), inner.to_string());

    let err: DiffError = IntrospectError::ValueWithoutKey.into();
    assert!(matches!(err, DiffError::Introspect(_)));
}

#[test]
fn test_format_error_display() {
    assert_eq!(
        FormatError::UnknownFormat.to_string(),
        "Could not detect the encoding of the format definition"
    );
}
