use kiln::error::{Error, ErrorKind};
use std::io;
use std::path::PathBuf;

#[test]
fn test_error_kinds() {
    assert_eq!(Error::missing("folder").kind(), ErrorKind::MissingMandatoryValue);
    assert_eq!(Error::unauthorized("baseName", "bad").kind(), ErrorKind::UnauthorizedValue);
    assert_eq!(
        Error::TemplateNotFound { namespace: "init".into(), filename: "a.j2".into() }.kind(),
        ErrorKind::TemplateNotFound
    );
    assert_eq!(Error::generation("boom").kind(), ErrorKind::Generation);
}

#[test]
fn test_error_display() {
    let err = Error::missing("folder");
    assert_eq!(err.to_string(), "Missing mandatory value: 'folder'.");

    let err = Error::unauthorized("baseName", "expected a string");
    assert_eq!(err.to_string(), "Unauthorized value for 'baseName': expected a string.");

    let err = Error::TemplateNotFound { namespace: "init".into(), filename: "README.md.j2".into() };
    assert_eq!(err.to_string(), "Template 'init/README.md.j2' not found.");

    let err = Error::NeedleNotFound { needle: "# needle".into(), file: PathBuf::from("a.txt") };
    assert_eq!(err.to_string(), "Needle '# needle' not found in 'a.txt'.");
}

#[test]
fn test_generation_error_keeps_cause() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system");
    let err = Error::generation_caused_by("The file 'README.md' can't be added", io_err);

    assert_eq!(err.to_string(), "The file 'README.md' can't be added");
    let cause = std::error::Error::source(&err).unwrap();
    assert_eq!(cause.to_string(), "read-only file system");
}
