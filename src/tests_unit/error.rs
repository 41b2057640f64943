use super::*;

#[test]
fn io_error_conversion_preserves_message() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err: SetCoverError = io_err.into();
    match err {
        SetCoverError::Io(message) => assert!(message.contains("no such file")),
        other => panic!("expected Io variant, got {other:?}"),
    }
}

#[test]
fn malformed_instance_formats_with_line_number() {
    let err = SetCoverError::MalformedInstance {
        format: "gecco2020".to_string(),
        line: 3,
        message: "unexpected token".to_string(),
    };
    let rendered = err.to_string();
    assert!(rendered.contains("gecco2020"));
    assert!(rendered.contains('3'));
    assert!(rendered.contains("unexpected token"));
}

#[test]
fn errors_are_comparable_for_equality() {
    let a = SetCoverError::UnknownFormat("xyz".to_string());
    let b = SetCoverError::UnknownFormat("xyz".to_string());
    assert_eq!(a, b);
}
