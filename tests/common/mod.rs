use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Copy the factorial fixture into a fresh directory tree with nested
/// subdirectories, so directory runs exercise recursion
pub fn setup() -> TempDir {
    let run_dir = tempfile::tempdir().expect("create temp run directory");
    fs::create_dir_all(run_dir.path().join("dir1/dir11")).expect("create nested directories");
    fs::create_dir_all(run_dir.path().join("dir2")).expect("create nested directories");

    let fixture = resource("factorial.js");
    for target in ["actual.js", "dir1/dir11/actual.js", "dir2/actual.js"] {
        fs::copy(&fixture, run_dir.path().join(target)).expect("copy fixture");
    }
    // a file the extension filter must skip
    fs::write(run_dir.path().join("notes.txt"), "número positive\n").expect("write notes");

    run_dir
}

/// Absolute path of a file under tests/resources
pub fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

/// Assert that every copy of the processed file matches the expected fixture
pub fn assert_results(expected_name: &str, run_dir: &Path) {
    let expected = fs::read_to_string(resource(expected_name)).expect("read expected fixture");
    for target in ["actual.js", "dir1/dir11/actual.js", "dir2/actual.js"] {
        let actual = fs::read_to_string(run_dir.join(target)).expect("read actual file");
        assert_eq!(actual, expected, "mismatch in {}", target);
    }
}
