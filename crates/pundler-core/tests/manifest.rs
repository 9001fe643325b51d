use pundler_core::manifest::RequirementsFile;
use pundler_util::errors::PundlerError;

#[test]
fn comments_and_blank_lines_are_ignored() {
    let lines = RequirementsFile::parse("# deps\n\nfoo>=1.0\n   \n  bar  \n#baz\n");
    assert_eq!(lines, vec!["foo>=1.0", "bar"]);
}

#[test]
fn missing_file_is_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = RequirementsFile::from_path(&dir.path().join("requirements.txt")).unwrap_err();
    assert!(matches!(err, PundlerError::MissingInput { .. }));
}

#[test]
fn requirements_are_parsed_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requirements.txt");
    std::fs::write(&path, "Foo>=1.0\nbar (<2)\n").unwrap();
    let file = RequirementsFile::from_path(&path).unwrap();
    let reqs = file.requirements().unwrap();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].query(), "foo>=1.0");
    assert_eq!(reqs[1].query(), "bar<2");
}

#[test]
fn malformed_line_fails_parse() {
    let file = RequirementsFile {
        path: "requirements.txt".into(),
        lines: vec!["foo".to_string(), "==1.0".to_string()],
    };
    assert!(matches!(
        file.requirements().unwrap_err(),
        PundlerError::Parse { .. }
    ));
}
