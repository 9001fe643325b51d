use std::cell::RefCell;
use std::path::Path;

use pundler_core::config::ProjectConfig;
use pundler_core::distribution::Distribution;
use pundler_ops::{ops_find, ops_install, ops_list, ops_lock, ops_verify};
use pundler_resolver::locator::MemoryLocator;
use pundler_store::installer::Installer;
use pundler_util::errors::{PundlerError, PundlerResult};

#[derive(Default)]
struct CountingInstaller {
    calls: RefCell<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl Installer for CountingInstaller {
    fn install(&self, name: &str, version: &str, target_dir: &Path) -> PundlerResult<()> {
        self.calls.borrow_mut().push(format!("{name}=={version}"));
        if self.fail_on == Some(name) {
            return Err(PundlerError::Install {
                name: name.to_string(),
                message: "exit status: 1".to_string(),
            });
        }
        if name == "bar" {
            std::fs::write(target_dir.join("bar.py"), "")?;
        } else {
            let pkg = target_dir.join(name);
            std::fs::create_dir_all(&pkg)?;
            std::fs::write(pkg.join("__init__.py"), "")?;
        }
        std::fs::create_dir_all(target_dir.join(format!("{name}-{version}.dist-info")))?;
        Ok(())
    }
}

fn foo_bar_index() -> MemoryLocator {
    MemoryLocator::new()
        .with(Distribution::new("foo", "1.0"))
        .with(Distribution::new("foo", "2.0").with_requires(["bar"]))
        .with(Distribution::new("bar", "3.1"))
}

fn project(requirements: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("requirements.txt"), requirements).unwrap();
    dir
}

fn read(root: &Path, file: &str) -> String {
    std::fs::read_to_string(root.join(file)).unwrap()
}

#[test]
fn end_to_end_foo_requires_bar() {
    let dir = project("# app deps\nfoo>=1.0\n");
    let config = ProjectConfig::default();
    let installer = CountingInstaller::default();

    let summary = ops_install::install(dir.path(), &config, &foo_bar_index(), &installer).unwrap();

    assert_eq!(summary.installed, 2);
    assert_eq!(read(dir.path(), "freezed.txt"), "bar==3.1\nfoo==2.0\n");
    assert_eq!(*installer.calls.borrow(), vec!["bar==3.1", "foo==2.0"]);
    assert!(dir.path().join("Pundledir/foo-2.0/foo/__init__.py").is_file());
    assert!(dir.path().join("Pundledir/bar-3.1/bar.py").is_file());
    assert_eq!(
        read(dir.path(), "pundles.txt"),
        "bar###3.1###Pundledir/bar-3.1/bar.py\nfoo###2.0###Pundledir/foo-2.0/foo\n"
    );
}

#[test]
fn rerun_issues_no_installs() {
    let dir = project("foo>=1.0\n");
    let config = ProjectConfig::default();
    let locator = foo_bar_index();

    let first = CountingInstaller::default();
    ops_install::install(dir.path(), &config, &locator, &first).unwrap();
    assert_eq!(first.calls.borrow().len(), 2);

    let second = CountingInstaller::default();
    let summary = ops_install::install(dir.path(), &config, &locator, &second).unwrap();
    assert!(second.calls.borrow().is_empty());
    assert_eq!(summary.fresh, 2);
    assert_eq!(summary.installed, 0);
}

#[test]
fn missing_requirements_file_fails_before_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let err = ops_lock::lock(dir.path(), &ProjectConfig::default(), &foo_bar_index()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PundlerError>(),
        Some(PundlerError::MissingInput { .. })
    ));
    assert!(!dir.path().join("freezed.txt").exists());
}

#[test]
fn unresolvable_requirement_writes_nothing() {
    let dir = project("foo\nmissing>=1\n");
    let installer = CountingInstaller::default();
    let err = ops_install::install(dir.path(), &ProjectConfig::default(), &foo_bar_index(), &installer)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PundlerError>(),
        Some(PundlerError::Resolution { .. })
    ));
    assert!(!dir.path().join("freezed.txt").exists());
    assert!(installer.calls.borrow().is_empty());
}

#[test]
fn install_failure_keeps_earlier_pundles() {
    let dir = project("foo>=1.0\n");
    let installer = CountingInstaller {
        fail_on: Some("foo"),
        ..Default::default()
    };
    let err = ops_install::install(dir.path(), &ProjectConfig::default(), &foo_bar_index(), &installer)
        .unwrap_err();
    assert!(err.to_string().contains("foo was not installed"));

    // Freeze file is written before installs run.
    assert_eq!(read(dir.path(), "freezed.txt"), "bar==3.1\nfoo==2.0\n");
    assert!(dir.path().join("Pundledir/bar-3.1").is_dir());
    assert!(!dir.path().join("Pundledir/foo-2.0").exists());
    assert!(!dir.path().join("pundles.txt").exists());
}

#[test]
fn list_verify_and_find_after_install() {
    let dir = project("foo\n");
    let config = ProjectConfig::default();
    ops_install::install(
        dir.path(),
        &config,
        &foo_bar_index(),
        &CountingInstaller::default(),
    )
    .unwrap();

    let installed = ops_list::list(dir.path(), &config).unwrap();
    assert_eq!(installed["foo"], vec!["2.0"]);
    assert_eq!(installed["bar"], vec!["3.1"]);

    assert_eq!(ops_verify::verify(dir.path(), &config).unwrap(), 2);

    let spec = ops_find::find(dir.path(), &config, "foo").unwrap().unwrap();
    assert!(spec.is_package);
    assert_eq!(
        spec.origin,
        dir.path().join("Pundledir/foo-2.0/foo/__init__.py")
    );
    let bar = ops_find::find(dir.path(), &config, "bar").unwrap().unwrap();
    assert!(!bar.is_package);
    assert!(ops_find::find(dir.path(), &config, "baz").unwrap().is_none());
}

#[test]
fn verify_reports_corruption() {
    let dir = project("bar\n");
    let config = ProjectConfig::default();
    ops_install::install(
        dir.path(),
        &config,
        &foo_bar_index(),
        &CountingInstaller::default(),
    )
    .unwrap();
    std::fs::write(dir.path().join("Pundledir/bar-3.1/bar.py"), "tampered").unwrap();

    let err = ops_verify::verify(dir.path(), &config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PundlerError>(),
        Some(PundlerError::Fingerprint { .. })
    ));
}

#[test]
fn custom_paths_from_config() {
    let dir = project("bar\n");
    let config = ProjectConfig::parse_toml(
        "freeze-file = \"locked.txt\"\nrecords-file = \"modules.txt\"\npundle-dir = \"vendor\"\n",
    )
    .unwrap();
    ops_install::install(
        dir.path(),
        &config,
        &foo_bar_index(),
        &CountingInstaller::default(),
    )
    .unwrap();
    assert_eq!(read(dir.path(), "locked.txt"), "bar==3.1\n");
    assert_eq!(read(dir.path(), "modules.txt"), "bar###3.1###vendor/bar-3.1/bar.py\n");
}
