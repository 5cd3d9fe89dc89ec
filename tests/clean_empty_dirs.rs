use assert_fs::prelude::*;
use mv_file::{MoveOptions, move_file};

fn mapping(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect()
}

#[tokio::test]
async fn clean_collapses_empty_ancestors_up_to_cwd() {
    // moving source/subdir/file1.txt leaves source/subdir and source empty;
    // both are removed, cwd itself survives
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("source/subdir/file1.txt").write_str("x").unwrap();

    let mut options = MoveOptions::new(temp.path());
    options.clean = true;
    move_file(&mapping(&[("source/subdir/file1.txt", "out/file1.txt")]), options)
        .await
        .unwrap();

    assert!(temp.path().join("out/file1.txt").is_file());
    assert!(!temp.path().join("source/subdir").exists());
    assert!(!temp.path().join("source").exists());
    assert!(temp.path().is_dir());
}

#[tokio::test]
async fn clean_stops_at_non_empty_ancestor() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("source/subdir/file1.txt").write_str("x").unwrap();
    temp.child("source/other.txt").write_str("keep").unwrap();

    let mut options = MoveOptions::new(temp.path());
    options.clean = true;
    move_file(&mapping(&[("source/subdir/file1.txt", "out/file1.txt")]), options)
        .await
        .unwrap();

    assert!(!temp.path().join("source/subdir").exists());
    assert!(temp.path().join("source/other.txt").is_file());
}

#[tokio::test]
async fn clean_is_bounded_by_the_base_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("source/a/b.txt").write_str("x").unwrap();

    let mut options = MoveOptions::new(temp.path());
    options.base = Some("source".into());
    options.clean = true;
    move_file(&mapping(&[("source/a/b.txt", "out/b.txt")]), options)
        .await
        .unwrap();

    // "source/a" collapsed, but the base itself is never deleted even
    // though it is now empty
    assert!(!temp.path().join("source/a").exists());
    assert!(temp.path().join("source").is_dir());
}

#[tokio::test]
async fn without_clean_empty_dirs_are_left_behind() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("source/subdir/file1.txt").write_str("x").unwrap();

    move_file(
        &mapping(&[("source/subdir/file1.txt", "out/file1.txt")]),
        MoveOptions::new(temp.path()),
    )
    .await
    .unwrap();

    assert!(!temp.path().join("source/subdir/file1.txt").exists());
    assert!(temp.path().join("source/subdir").is_dir());
}
