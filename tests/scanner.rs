use eldeps::core::scanner::{package_name_for_dir, resolve_main_file, PackageScanner};
use eldeps::ScanError;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn write<P: AsRef<Path>>(p: P, content: &str) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

fn requires(deps: &str) -> String {
    format!(";;; header\n;; Package-Requires: ({deps})\n(provide 'x)\n")
}

#[test]
fn package_names_strip_the_source_extension() {
    assert_eq!(package_name_for_dir("foo.el"), "foo");
    assert_eq!(package_name_for_dir("org-roam.el"), "org-roam");
    assert_eq!(package_name_for_dir("magit"), "magit");
    assert_eq!(package_name_for_dir(".hidden.el"), ".hidden.el");
    assert_eq!(package_name_for_dir("foo.elc"), "foo.elc");
}

#[test]
fn single_file_is_always_the_main_file() {
    let files = vec![PathBuf::from("pkg/unrelated.el")];
    assert_eq!(resolve_main_file("pkg", &files), Some(&files[0]));
}

#[test]
fn main_file_among_many_must_match_package_name() {
    let files = vec![PathBuf::from("pkg/pkg-utils.el"), PathBuf::from("pkg/pkg.el")];
    assert_eq!(resolve_main_file("pkg", &files), Some(&files[1]));

    let files = vec![PathBuf::from("pkg/a.el"), PathBuf::from("pkg/b.el")];
    assert_eq!(resolve_main_file("pkg", &files), None);

    assert_eq!(resolve_main_file("pkg", &[]), None);
}

#[test]
fn scan_two_package_repository() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root.join("alpha/alpha.el"),
        ";; Package-Requires: ((emacs \"27.1\") (beta \"0.1\"))\n",
    );
    write(root.join("beta/beta.el"), ";;; beta.el --- no header\n");

    let deps = PackageScanner::new().scan(root).unwrap();

    assert_eq!(deps.len(), 2);
    assert_eq!(deps["alpha"], set(&["emacs", "beta"]));
    assert_eq!(deps["beta"], set(&[]));
}

#[test]
fn suffixed_directory_name_becomes_package_name() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path().join("foo.el/foo.el"), "(provide 'foo)\n");

    let deps = PackageScanner::new().scan(dir.path()).unwrap();

    assert_eq!(deps.keys().collect::<Vec<_>>(), vec!["foo"]);
    assert!(deps["foo"].is_empty());
}

#[test]
fn colliding_directories_merge_their_dependencies() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("foo/foo.el"), &requires("(dash \"2.0\")"));
    write(root.join("foo.el/foo.el"), &requires("(s \"1.0\")"));

    let deps = PackageScanner::new().scan(root).unwrap();

    assert_eq!(deps.len(), 1);
    assert_eq!(deps["foo"], set(&["dash", "s"]));
}

#[test]
fn main_file_only_ignores_secondary_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("pkg/pkg.el"), &requires("(emacs \"28.1\")"));
    write(root.join("pkg/pkg-extra.el"), &requires("(helm \"3.0\")"));

    let main_only = PackageScanner::new().scan(root).unwrap();
    assert_eq!(main_only["pkg"], set(&["emacs"]));

    let all_files = PackageScanner::new()
        .with_main_file_only(false)
        .scan(root)
        .unwrap();
    assert_eq!(all_files["pkg"], set(&["emacs", "helm"]));
}

#[test]
fn package_without_main_file_is_present_and_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("pkg/one.el"), &requires("dash"));
    write(root.join("pkg/two.el"), &requires("s"));

    let deps = PackageScanner::new().scan(root).unwrap();
    assert_eq!(deps["pkg"], set(&[]));
}

#[test]
fn non_directories_and_foreign_files_are_ignored() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("README.md"), "# repo\n");
    write(root.join("pkg/pkg.el"), &requires("dash"));
    write(root.join("pkg/notes.txt"), &requires("should-not-appear"));
    fs::create_dir_all(root.join("pkg/sub.el")).unwrap();

    let deps = PackageScanner::new()
        .with_main_file_only(false)
        .scan(root)
        .unwrap();

    assert_eq!(deps.len(), 1);
    assert_eq!(deps["pkg"], set(&["dash"]));
}

#[test]
fn scanning_twice_is_idempotent() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("a/a.el"), &requires("(b \"1\") c"));
    write(root.join("b/b.el"), &requires("c"));
    write(root.join("c.el/c.el"), "");

    let scanner = PackageScanner::new();
    assert_eq!(scanner.scan(root).unwrap(), scanner.scan(root).unwrap());
}

#[test]
fn invalid_repository_path_is_a_distinct_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("not-a-dir");
    fs::write(&file, "").unwrap();

    let err = PackageScanner::new().scan(&file).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory { .. }));

    let err = PackageScanner::new()
        .scan(&dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory { .. }));
}

#[test]
fn empty_repository_scans_to_empty_map() {
    let dir = tempfile::TempDir::new().unwrap();
    let deps = PackageScanner::new().scan(dir.path()).unwrap();
    assert!(deps.is_empty());
}
