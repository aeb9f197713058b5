//! Integration tests for the farm rules.
//!
//! These tests verify that:
//! 1. Every classification holds on the in-memory backend
//! 2. The host backend produces the same classifications on a real tree
//! 3. Lookup failures are propagated, not reclassified
//! 4. The check composes with middleware and runs concurrently

use farm_rules::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

// =============================================================================
// Scenario Table
// =============================================================================

/// Expected outcome of a check: success, or a specific rejection.
type Want = Option<FarmErrorKind>;

struct Scenario {
    name: &'static str,
    fs: MemoryFs,
    path: &'static str,
    want: Want,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "path to dir with .farm file is good",
            fs: MemoryFs::new().with_file("path/to/dir-with-farm-file/.farm", b""),
            path: "path/to/dir-with-farm-file",
            want: None,
        },
        Scenario {
            name: "path to dir with no .farm file is invalid",
            fs: MemoryFs::new().with_dir("path/to/dir-with-no-farm-file"),
            path: "path/to/dir-with-no-farm-file",
            want: Some(FarmErrorKind::NoFarmFile),
        },
        Scenario {
            name: "path to dir with .farm dir is invalid",
            fs: MemoryFs::new().with_dir("path/to/dir-with-farm-dir/.farm"),
            path: "path/to/dir-with-farm-dir",
            want: Some(FarmErrorKind::FarmFileNotRegular),
        },
        Scenario {
            name: "path to dir with .farm link is invalid",
            fs: MemoryFs::new().with_symlink("path/to/dir-with-farm-link/.farm", "some/path"),
            path: "path/to/dir-with-farm-link",
            want: Some(FarmErrorKind::FarmFileNotRegular),
        },
        Scenario {
            name: "path to dir with .farm socket is invalid",
            fs: MemoryFs::new().with_other("path/to/dir-with-farm-socket/.farm"),
            path: "path/to/dir-with-farm-socket",
            want: Some(FarmErrorKind::FarmFileNotRegular),
        },
        Scenario {
            name: "path to file is invalid",
            fs: MemoryFs::new().with_file("path/to/file", b""),
            path: "path/to/file",
            want: Some(FarmErrorKind::NotDir),
        },
        Scenario {
            name: "path to link is invalid",
            fs: MemoryFs::new().with_symlink("path/to/link", "some/place"),
            path: "path/to/link",
            want: Some(FarmErrorKind::NotDir),
        },
        Scenario {
            name: "path to file next to .farm is still not a dir",
            fs: MemoryFs::new()
                .with_file("path/to/file", b"")
                .with_file("path/to/.farm", b""),
            path: "path/to/file",
            want: Some(FarmErrorKind::NotDir),
        },
        Scenario {
            name: "path to non-existent entry is invalid",
            fs: MemoryFs::new(),
            path: "path/to/nothing",
            want: Some(FarmErrorKind::NotExist),
        },
    ]
}

fn assert_outcome(name: &str, got: Result<(), FarmError>, want: Want) {
    match (got, want) {
        (Ok(()), None) => {}
        (Err(err), Some(kind)) => {
            assert!(err.is(kind), "{name}: got {err:?}, want {kind:?}");
            assert_eq!(err.family(), Some(kind.family()), "{name}");
        }
        (got, want) => panic!("{name}: got {got:?}, want {want:?}"),
    }
}

#[test]
fn check_farm_path_scenarios() {
    for s in scenarios() {
        let got = check_is_farm(&s.fs, s.path);
        assert_outcome(s.name, got, s.want);
    }
}

#[test]
fn general_families_match_generic_conditions() {
    for s in scenarios() {
        let Err(err) = check_is_farm(&s.fs, s.path) else {
            continue;
        };
        match err.kind() {
            Some(FarmErrorKind::NotExist) => {
                assert!(err.is_not_exist(), "{}", s.name);
                assert!(!err.is_invalid(), "{}", s.name);
            }
            Some(FarmErrorKind::NoFarmFile) => {
                assert!(err.is_not_exist(), "{}", s.name);
                assert!(err.is_invalid(), "{}", s.name);
            }
            Some(FarmErrorKind::NotDir | FarmErrorKind::FarmFileNotRegular) => {
                assert!(err.is_invalid(), "{}", s.name);
                assert!(!err.is_not_exist(), "{}", s.name);
            }
            None => panic!("{}: unexpected lookup error {err:?}", s.name),
        }
    }
}

#[test]
fn io_error_kinds_follow_families() {
    for s in scenarios() {
        let Err(err) = check_is_farm(&s.fs, s.path) else {
            continue;
        };
        let family = err.family().unwrap();
        let io_err: std::io::Error = err.into();
        assert_eq!(io_err.kind(), family.io_kind(), "{}", s.name);
    }
}

#[test]
fn is_farm_agrees_with_check() {
    for s in scenarios() {
        assert_eq!(s.fs.is_farm(s.path).unwrap(), s.want.is_none(), "{}", s.name);
    }
}

// =============================================================================
// General Conditions
// =============================================================================

/// Every rejection a caller checking only the general condition must see.
fn family_scenarios() -> Vec<(&'static str, MemoryFs, &'static str, Option<ErrorFamily>)> {
    vec![
        (
            "path to dir with .farm file is good",
            MemoryFs::new().with_file("path/to/dir-with-farm-file/.farm", b""),
            "path/to/dir-with-farm-file",
            None,
        ),
        (
            "path to dir with no .farm file is error",
            MemoryFs::new().with_dir("path/to/dir-with-no-farm-file"),
            "path/to/dir-with-no-farm-file",
            Some(ErrorFamily::Invalid),
        ),
        (
            "path to file is error",
            MemoryFs::new().with_file("path/to/file", b""),
            "path/to/file",
            Some(ErrorFamily::Invalid),
        ),
        (
            "path to link is error",
            MemoryFs::new().with_symlink("path/to/link", "some/place"),
            "path/to/link",
            Some(ErrorFamily::Invalid),
        ),
        (
            "path to non-existent entry is error",
            MemoryFs::new(),
            "path/to/nothing",
            Some(ErrorFamily::NotExist),
        ),
    ]
}

#[test]
fn farm_rules_classify_by_general_condition() {
    for (name, fs, path, want) in family_scenarios() {
        match (check_is_farm(&fs, path), want) {
            (Ok(()), None) => {}
            (Err(err), Some(family)) => {
                assert!(err.in_family(family), "{name}: got {err:?}, want {family:?}");
            }
            (got, want) => panic!("{name}: got {got:?}, want {want:?}"),
        }
    }
}

// =============================================================================
// Propagated Lookup Failures
// =============================================================================

#[test]
fn parent_component_not_a_directory_is_propagated() {
    let fs = MemoryFs::new().with_file("a", b"");
    let err = check_is_farm(&fs, "a/b").unwrap_err();
    assert!(matches!(err, FarmError::Lookup(FsError::NotADirectory { .. })));
    assert_eq!(err.kind(), None);
    assert!(fs.is_farm("a/b").is_err());
}

#[test]
fn denied_candidate_is_propagated() {
    let fs = MemoryFs::new()
        .with_file("locked/.farm", b"")
        .with_denied("locked");
    let err = check_is_farm(&fs, "locked").unwrap_err();
    match err {
        FarmError::Lookup(FsError::PermissionDenied { path, .. }) => {
            assert_eq!(path, Path::new("locked"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn denied_farm_file_is_propagated() {
    let fs = MemoryFs::new()
        .with_file("field/.farm", b"")
        .with_denied("field/.farm");
    let err = check_is_farm(&fs, "field").unwrap_err();
    assert!(matches!(
        err,
        FarmError::Lookup(FsError::PermissionDenied { .. })
    ));
    let io_err: std::io::Error = err.into();
    assert_eq!(io_err.kind(), std::io::ErrorKind::PermissionDenied);
}

// =============================================================================
// Root Paths
// =============================================================================

#[test]
fn empty_and_dot_paths_name_the_root() {
    let farm = MemoryFs::new().with_file(".farm", b"");
    assert!(check_is_farm(&farm, "").is_ok());
    assert!(check_is_farm(&farm, ".").is_ok());

    let bare = MemoryFs::new();
    assert!(check_is_farm(&bare, "").unwrap_err().is(FarmErrorKind::NoFarmFile));
    assert!(check_is_farm(&bare, ".").unwrap_err().is(FarmErrorKind::NoFarmFile));
}

#[test]
fn absolute_paths_address_the_same_entries() {
    let fs = MemoryFs::new().with_file("a/b/.farm", b"");
    assert!(check_is_farm(&fs, "/a/b").is_ok());
}

// =============================================================================
// Host Filesystem
// =============================================================================

#[test]
fn native_fs_classifies_real_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("good")).unwrap();
    fs::write(root.join("good/.farm"), b"").unwrap();
    fs::create_dir_all(root.join("bare")).unwrap();
    fs::create_dir_all(root.join("nested/.farm")).unwrap();
    fs::write(root.join("file"), b"not a dir").unwrap();

    let native = NativeFs::new(root);
    assert_outcome("good", check_is_farm(&native, "good"), None);
    assert_outcome(
        "bare",
        check_is_farm(&native, "bare"),
        Some(FarmErrorKind::NoFarmFile),
    );
    assert_outcome(
        "nested",
        check_is_farm(&native, "nested"),
        Some(FarmErrorKind::FarmFileNotRegular),
    );
    assert_outcome(
        "file",
        check_is_farm(&native, "file"),
        Some(FarmErrorKind::NotDir),
    );
    assert_outcome(
        "missing",
        check_is_farm(&native, "missing"),
        Some(FarmErrorKind::NotExist),
    );
}

#[test]
fn native_fs_rejections_report_requested_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("bare")).unwrap();

    let native = NativeFs::new(dir.path());
    let err = check_is_farm(&native, "bare").unwrap_err();
    assert_eq!(err.path(), Some(Path::new("bare/.farm")));
}

#[cfg(unix)]
#[test]
fn native_fs_symlinks_are_rejected() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("real")).unwrap();
    fs::write(root.join("real/.farm"), b"").unwrap();
    symlink("real", root.join("link-to-farm")).unwrap();
    fs::create_dir_all(root.join("linked-marker")).unwrap();
    symlink("../real/.farm", root.join("linked-marker/.farm")).unwrap();

    let native = NativeFs::new(root);
    assert_outcome(
        "link to farm dir",
        check_is_farm(&native, "link-to-farm"),
        Some(FarmErrorKind::NotDir),
    );
    assert_outcome(
        "link to farm dir with trailing slash",
        check_is_farm(&native, "link-to-farm/"),
        Some(FarmErrorKind::NotDir),
    );
    assert_outcome(
        "symlinked .farm",
        check_is_farm(&native, "linked-marker"),
        Some(FarmErrorKind::FarmFileNotRegular),
    );
    assert!(native.is_farm("real").unwrap());
}

#[cfg(unix)]
#[test]
fn native_fs_parent_not_a_directory_is_propagated() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("file"), b"").unwrap();

    let native = NativeFs::new(dir.path());
    let err = check_is_farm(&native, "file/child").unwrap_err();
    assert!(matches!(err, FarmError::Lookup(FsError::NotADirectory { .. })));
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn check_runs_through_logging_layer() {
    let fs = MemoryFs::new()
        .with_file("herd/.farm", b"")
        .layer(LoggingLayer::new(log::Level::Debug));
    assert!(check_is_farm(&fs, "herd").is_ok());
    assert!(check_is_farm(&fs, "flock").unwrap_err().is_not_exist());
}

#[test]
fn check_runs_on_boxed_trait_object() {
    let backends: Vec<Box<dyn FsStat>> = vec![
        Box::new(MemoryFs::new().with_file("x/.farm", b"")),
        Box::new(MemoryFs::new().with_file("x/.farm", b"").layer(LoggingLayer::default())),
    ];
    for backend in &backends {
        assert!(backend.is_farm("x").unwrap());
    }
}

#[test]
fn concurrent_checks_share_one_backend() {
    let fs = Arc::new(
        MemoryFs::new()
            .with_file("farms/0/.farm", b"")
            .with_file("farms/1/.farm", b"")
            .with_dir("farms/2"),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                let path = format!("farms/{}", i % 3);
                fs.is_farm(&path).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i % 3 != 2);
    }
}

#[test]
fn result_reflects_filesystem_at_call_time() {
    let fs = MemoryFs::new().with_dir("field");
    assert!(!fs.is_farm("field").unwrap());
    fs.insert_file("field/.farm", b"");
    assert!(fs.is_farm("field").unwrap());
    fs.remove("field/.farm").unwrap();
    assert!(check_is_farm(&fs, "field").unwrap_err().is(FarmErrorKind::NoFarmFile));
}
