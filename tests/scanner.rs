use std::fs;
use std::path::Path;
use teststub::core::scanner::{ExclusionSet, FileScanner};

fn touch<P: AsRef<Path>>(p: P) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, "def f():\n    pass\n").unwrap();
}

fn module_names(scanner: &FileScanner, root: &Path) -> Vec<String> {
    let mut names: Vec<_> = scanner
        .scan_directory(root)
        .unwrap()
        .into_iter()
        .map(|m| m.module_name)
        .collect();
    names.sort();
    names
}

#[test]
fn scanner_picks_up_python_modules_at_any_depth() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("a.py"));
    touch(root.join("pkg/deep/nested/b.py"));
    touch(root.join("pkg/readme.txt"));
    touch(root.join("pkg/stub.pyi"));

    let names = module_names(&FileScanner::default(), root);
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn scanner_prunes_excluded_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("app.py"));
    touch(root.join("venv/lib/site.py"));
    touch(root.join(".venv/lib/other.py"));
    touch(root.join("pkg/__pycache__/cached.py"));
    // file names are not subject to the exclusion set
    touch(root.join("pkg/venv_tools.py"));

    let names = module_names(&FileScanner::default(), root);
    assert_eq!(names, vec!["app", "venv_tools"]);
}

#[test]
fn scanner_accepts_extra_fragments() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("keep.py"));
    touch(root.join("build/generated.py"));

    let scanner = FileScanner::new(ExclusionSet::default().with_fragment("build"));
    assert_eq!(module_names(&scanner, root), vec!["keep"]);
}

#[test]
fn exclusion_fragments_do_not_apply_to_the_root_itself() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().join("venv_project");
    touch(root.join("main.py"));

    assert_eq!(module_names(&FileScanner::default(), &root), vec!["main"]);
}

#[test]
fn scanner_never_yields_files_under_the_output_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("a.py"));
    touch(root.join("out/test_a.py"));
    touch(root.join("out/nested/test_b.py"));

    let scanner = FileScanner::default().with_output_guard(&root.join("out"));
    assert_eq!(module_names(&scanner, root), vec!["a"]);

    // without the guard the generated files are ordinary inputs
    let unguarded = module_names(&FileScanner::default(), root);
    assert_eq!(unguarded, vec!["a", "test_a", "test_b"]);
}

#[test]
fn output_guard_matches_through_relative_components() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("src/a.py"));
    touch(root.join("src/out/test_a.py"));

    let scanner = FileScanner::default().with_output_guard(&root.join("src/../src/out"));
    assert_eq!(module_names(&scanner, &root.join("src")), vec!["a"]);
}

#[test]
fn scanning_a_missing_root_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = FileScanner::default().scan_directory(&missing).unwrap_err();
    assert_eq!(err.kind(), teststub::core::ErrorKind::Io);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_reported_and_the_walk_continues() {
    use std::os::unix::fs::PermissionsExt;
    use teststub::core::ErrorKind;

    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("a_locked/hidden.py"));
    touch(root.join("b_open/visible.py"));

    let locked = root.join("a_locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // permissions are not enforced for this user (e.g. root)
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let items: Vec<_> = FileScanner::default().scan(root).collect();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let names: Vec<_> = items
        .iter()
        .filter_map(|item| item.as_ref().ok())
        .map(|m| m.module_name.as_str())
        .collect();
    assert_eq!(names, vec!["visible"]);

    let errors: Vec<_> = items.iter().filter_map(|item| item.as_ref().err()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::Io);
    assert_eq!(errors[0].path(), locked.as_path());
}
