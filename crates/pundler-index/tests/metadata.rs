use pundler_core::marker::MarkerEnvironment;
use pundler_index::metadata::{runtime_requirements, ProjectMetadata};
use pundler_resolver::locator::select_best;

fn env(python: &str, platform: &str) -> MarkerEnvironment {
    MarkerEnvironment {
        python_version: python.to_string(),
        sys_platform: platform.to_string(),
        ..MarkerEnvironment::default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn markers_filter_and_are_stripped() {
    let requires = strings(&[
        "charset-normalizer (<4,>=2)",
        "idna<4,>=2.5",
        "importlib-metadata>=3.6; python_version < \"3.10\"",
        "colorama; sys_platform == \"win32\"",
        "PySocks!=1.5.7,>=1.5.6; extra == \"socks\"",
    ]);
    assert_eq!(
        runtime_requirements(&requires, &env("3.11", "linux")),
        vec!["charset-normalizer<4,>=2", "idna<4,>=2.5"]
    );
    assert_eq!(
        runtime_requirements(&requires, &env("3.8", "win32")),
        vec![
            "charset-normalizer<4,>=2",
            "idna<4,>=2.5",
            "importlib-metadata>=3.6",
            "colorama"
        ]
    );
}

#[test]
fn unparsable_entries_are_skipped() {
    let requires = strings(&[
        "six",
        "mylib @ https://example.com/mylib-1.0.tar.gz",
        "weird; no_such_var == \"x\"",
    ]);
    assert_eq!(runtime_requirements(&requires, &env("3.11", "linux")), vec!["six"]);
}

#[test]
fn release_document_requires_dist() {
    let meta = ProjectMetadata::parse(
        r#"{
            "info": {
                "name": "Jinja2",
                "version": "3.1.2",
                "requires_dist": ["MarkupSafe (>=2.0)", "Babel (>=2.7) ; extra == 'i18n'"]
            },
            "releases": {}
        }"#,
    )
    .unwrap();
    assert_eq!(meta.info.name, "Jinja2");
    assert_eq!(
        runtime_requirements(meta.requires_dist(), &MarkerEnvironment::default()),
        vec!["markupsafe>=2.0"]
    );
}

#[test]
fn best_available_version_is_selected() {
    let meta = ProjectMetadata::parse(
        r#"{
            "info": {"name": "foo", "version": "2.0"},
            "releases": {
                "1.0": [{"yanked": false}],
                "1.9": [{"yanked": true}],
                "2.0b1": [{"yanked": false}],
                "1.8": [{"yanked": false}]
            }
        }"#,
    )
    .unwrap();
    assert_eq!(select_best(meta.available_versions(), &[], false), Some("1.8"));
    assert_eq!(select_best(meta.available_versions(), &[], true), Some("2.0b1"));
}
