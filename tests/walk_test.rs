use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use foldex::engine::{drive, walk_tree, WalkConfig};
use foldex::{Classifier, EntryKind, FoldexError, PlatformClassifier, Visitor};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Scratch directory whose own name is not a dotfile.
fn scratch() -> tempfile::TempDir {
    tempfile::Builder::new().prefix("foldex-").tempdir().unwrap()
}

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```
/// tmp/
///   a.txt
///   .env
///   .git/
///     config
///   sub/
///     b.txt
///     deeper/
///       c.txt
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = scratch();
    let root = dir.path();

    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join(".env"), "KEY=1").unwrap();

    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join(".git").join("config"), "[core]").unwrap();

    let sub = root.join("sub");
    fs::create_dir_all(sub.join("deeper")).unwrap();
    fs::write(sub.join("b.txt"), "b").unwrap();
    fs::write(sub.join("deeper").join("c.txt"), "c").unwrap();

    dir
}

fn set(paths: &[PathBuf]) -> BTreeSet<PathBuf> {
    paths.iter().cloned().collect()
}

fn sorted(show_hidden: bool) -> WalkConfig {
    WalkConfig {
        show_hidden,
        sort_by_name: true,
    }
}

/// Fails the hidden probe for one base name.
struct FailOn(&'static str);

impl Classifier for FailOn {
    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        PlatformClassifier.kind(path)
    }

    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        if path.file_name().is_some_and(|n| n == self.0) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "probe denied"));
        }
        PlatformClassifier.is_hidden(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn empty_dir_records_only_itself() {
    let dir = scratch();
    let raw = foldex::walk(dir.path(), true).unwrap();

    assert_eq!(raw.visited, vec![dir.path().to_path_buf()]);
    assert!(raw.failed.is_empty());

    let trimmed = raw.without_root();
    assert!(trimmed.visited.is_empty(), "trimmed walk of an empty dir is empty");
}

#[cfg(unix)]
#[test]
fn every_file_recorded_hidden_dirs_skipped() {
    let dir = setup_test_dir();
    let root = dir.path();
    let result = foldex::walk(root, true).unwrap();

    let expected: BTreeSet<PathBuf> = [
        root.join("a.txt"),
        root.join(".env"),
        root.join(".git").join("config"),
        root.join("sub").join("b.txt"),
        root.join("sub").join("deeper").join("c.txt"),
        root.join("sub").join("deeper"),
        root.join("sub"),
        root.to_path_buf(),
    ]
    .into_iter()
    .collect();

    assert_eq!(set(&result.visited), expected);
    assert_eq!(result.visited.len(), expected.len(), "no entry recorded twice");
    assert!(!result.visited.contains(&root.join(".git")), "hidden dir is not recorded");
    assert_eq!(result.visited.last(), Some(&root.to_path_buf()), "root comes last");
    assert!(result.is_complete());
}

#[test]
fn without_hidden_policy_only_files_are_recorded() {
    let dir = setup_test_dir();
    let root = dir.path();
    let result = foldex::walk(root, false).unwrap();

    assert_eq!(result.visited.len(), 5);
    assert!(result.visited.iter().all(|p| p.is_file()));

    // Nothing to trim: the last entry is a file, not the root
    let trimmed = result.clone().without_root();
    assert_eq!(trimmed.visited, result.visited);
}

#[test]
fn sorted_walk_is_post_order_for_directories() {
    let dir = scratch();
    let root = dir.path();
    fs::write(root.join("a.txt"), "").unwrap();
    fs::create_dir(root.join("b")).unwrap();
    fs::write(root.join("b").join("c.txt"), "").unwrap();
    fs::write(root.join("d.txt"), "").unwrap();

    let result = walk_tree(root, &sorted(true), &PlatformClassifier).unwrap();

    assert_eq!(
        result.visited,
        vec![
            root.join("a.txt"),
            root.join("b").join("c.txt"),
            root.join("b"),
            root.join("d.txt"),
            root.to_path_buf(),
        ]
    );
}

#[test]
fn directories_follow_their_descendants() {
    let dir = setup_test_dir();
    let result = foldex::walk(dir.path(), true).unwrap();

    for (i, path) in result.visited.iter().enumerate() {
        if !path.is_dir() {
            continue;
        }
        let late = result.visited[i + 1..]
            .iter()
            .find(|p| p.starts_with(path) && *p != path);
        assert!(late.is_none(), "{} recorded after {}", late.unwrap().display(), path.display());
    }
}

#[test]
fn trimming_drops_exactly_the_root() {
    let dir = setup_test_dir();
    let raw = foldex::walk(dir.path(), true).unwrap();
    let raw_len = raw.visited.len();
    let trimmed = raw.without_root();

    assert_eq!(trimmed.visited.len(), raw_len - 1);
    assert!(!trimmed.visited.contains(&dir.path().to_path_buf()));
}

#[test]
fn one_failing_node_does_not_stop_the_walk() {
    let dir = scratch();
    let root = dir.path();
    for i in 0..9 {
        fs::write(root.join(format!("file_{i}.txt")), "ok").unwrap();
    }
    fs::write(root.join("broken.txt"), "unreadable").unwrap();

    let result = walk_tree(root, &WalkConfig::new(true), &FailOn("broken.txt")).unwrap();

    assert_eq!(result.visited.len(), 10, "9 files plus the root");
    assert_eq!(result.failed, vec![root.join("broken.txt")]);
    assert!(!result.visited.contains(&root.join("broken.txt")));
}

#[test]
fn hidden_probe_only_runs_under_hidden_policy() {
    let dir = scratch();
    fs::write(dir.path().join("broken.txt"), "").unwrap();

    let result = walk_tree(dir.path(), &WalkConfig::new(false), &FailOn("broken.txt")).unwrap();

    assert_eq!(result.visited, vec![dir.path().join("broken.txt")]);
    assert!(result.failed.is_empty());
}

#[test]
fn failing_directory_probe_keeps_its_files() {
    let dir = scratch();
    let root = dir.path();
    fs::create_dir(root.join("odd")).unwrap();
    fs::write(root.join("odd").join("inside.txt"), "").unwrap();

    let result = walk_tree(root, &WalkConfig::new(true), &FailOn("odd")).unwrap();

    assert_eq!(result.failed, vec![root.join("odd")]);
    assert!(result.visited.contains(&root.join("odd").join("inside.txt")));
    assert!(!result.visited.contains(&root.join("odd")));
}

#[test]
fn missing_root_is_fatal() {
    let dir = scratch();
    let missing = dir.path().join("nope");

    let err = foldex::walk(&missing, true).unwrap_err();

    assert!(matches!(err, FoldexError::RootNotFound(ref p) if *p == missing));
    assert!(!err.is_recoverable());
}

#[test]
fn file_root_is_recorded_and_trimmed() {
    let dir = scratch();
    let file = dir.path().join("lonely.txt");
    fs::write(&file, "x").unwrap();

    let result = foldex::walk(&file, true).unwrap();
    assert_eq!(result.visited, vec![file.clone()]);
    assert!(result.without_root().visited.is_empty());
}

#[test]
fn repeated_walks_agree() {
    let dir = setup_test_dir();
    let first = foldex::walk(dir.path(), true).unwrap();
    let second = foldex::walk(dir.path(), true).unwrap();

    assert_eq!(set(&first.visited), set(&second.visited));
    assert_eq!(first.failed, second.failed);
}

#[test]
fn files_match_reference_walker() {
    let dir = setup_test_dir();
    let result = foldex::walk(dir.path(), false).unwrap();

    let reference: BTreeSet<PathBuf> = walkdir::WalkDir::new(dir.path())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    assert_eq!(set(&result.visited), reference);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_goes_to_failed() {
    use std::os::unix::fs::PermissionsExt;

    let dir = scratch();
    let root = dir.path();
    let locked = root.join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret.txt"), "s").unwrap();
    fs::write(root.join("open.txt"), "o").unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Privileged user: permission bits are not enforced
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = foldex::walk(root, true);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let result = result.unwrap();

    assert_eq!(result.failed, vec![locked.clone()]);
    assert!(!result.visited.contains(&locked));
    assert!(result.visited.contains(&root.join("open.txt")));
    assert_eq!(result.visited.last(), Some(&root.to_path_buf()));
}

#[test]
fn custom_visitor_sees_balanced_events() {
    #[derive(Default)]
    struct Events {
        entered: Vec<PathBuf>,
        left:    Vec<PathBuf>,
        files:   usize,
    }

    impl Visitor for Events {
        fn on_enter_directory(&mut self, dir: &Path) {
            self.entered.push(dir.to_path_buf());
        }
        fn on_visit_file(&mut self, _file: &Path) {
            self.files += 1;
        }
        fn on_leave_directory(&mut self, dir: &Path) {
            self.left.push(dir.to_path_buf());
        }
        fn on_visit_failed(&mut self, path: &Path, _error: &FoldexError) {
            panic!("unexpected failure at {}", path.display());
        }
    }

    let dir = setup_test_dir();
    let mut events = Events::default();
    drive(dir.path(), &WalkConfig::default(), &mut events).unwrap();

    assert_eq!(events.files, 5);
    assert_eq!(events.entered.len(), 4, "root, .git, sub, sub/deeper");
    assert_eq!(set(&events.entered), set(&events.left));
    assert_eq!(events.entered.first(), Some(&dir.path().to_path_buf()));
    assert_eq!(events.left.last(), Some(&dir.path().to_path_buf()));
}
