use std::path::PathBuf;

use pundler_util::errors::PundlerError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = PundlerError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_parse_error_display() {
    let err = PundlerError::parse("foo>=", "missing version");
    assert_eq!(err.to_string(), "Invalid requirement 'foo>=': missing version");
}

#[test]
fn test_resolution_error_display() {
    let err = PundlerError::Resolution {
        name: "foo".to_string(),
    };
    assert_eq!(err.to_string(), "Distribution for foo was not found");
}

#[test]
fn test_install_error_display() {
    let err = PundlerError::Install {
        name: "foo".to_string(),
        message: "pip exited with status 1".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "foo was not installed due to an error: pip exited with status 1"
    );
}

#[test]
fn test_missing_input_display() {
    let err = PundlerError::MissingInput {
        path: PathBuf::from("requirements.txt"),
    };
    assert_eq!(err.to_string(), "File requirements.txt not found");
}

#[test]
fn test_fingerprint_error_display() {
    let err = PundlerError::Fingerprint {
        name: "bar".to_string(),
        version: "3.1".to_string(),
    };
    assert!(err.to_string().contains("bar-3.1"));
}

#[test]
fn test_generic_error_display() {
    let err = PundlerError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: PundlerError = io_err.into();
    assert!(matches!(err, PundlerError::Io(_)));
}
