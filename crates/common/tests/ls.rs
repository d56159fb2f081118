//! Integration tests for directory listing

mod common;

use std::collections::HashSet;

use ::common::fs::{DirectoryEntry, FileKind, FsError, VirtualPath};

fn entry(name: &str, kind: FileKind) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind,
    }
}

#[tokio::test]
async fn test_ls_root() {
    let fs = common::setup_test_fs();
    common::put(&fs, "readme.md", b"# hi").await;
    common::put(&fs, "docs/a.txt", b"a").await;
    common::put(&fs, "docs/img/logo.png", b"png").await;

    let items = fs.list_children(&fs.root()).await.unwrap();
    assert_eq!(
        items,
        vec![
            entry("docs", FileKind::Directory),
            entry("readme.md", FileKind::File),
        ]
    );
}

#[tokio::test]
async fn test_ls_subdirectory() {
    let fs = common::setup_test_fs();
    common::put(&fs, "docs/a.txt", b"a").await;
    common::put(&fs, "docs/b.txt", b"b").await;
    common::put(&fs, "docs/img/logo.png", b"png").await;
    common::put(&fs, "docs/img/icon.png", b"png").await;
    common::put(&fs, "other/c.txt", b"c").await;

    let items = fs.list_children(&fs.path("docs")).await.unwrap();
    assert_eq!(
        items,
        vec![
            entry("a.txt", FileKind::File),
            entry("b.txt", FileKind::File),
            entry("img", FileKind::Directory),
        ]
    );

    // Trailing separators make no difference
    let again = fs.list_children(&fs.path("docs/")).await.unwrap();
    assert_eq!(items, again);
}

#[tokio::test]
async fn test_ls_names_are_unique_and_relative() {
    let fs = common::setup_test_fs();
    common::put(&fs, "docs/notes", b"a file").await;
    common::put(&fs, "docs/notes/today.txt", b"a dir child").await;
    common::put(&fs, "docs/x.txt", b"x").await;

    let items = fs.list_children(&fs.path("docs")).await.unwrap();

    let names: Vec<&str> = items.iter().map(|e| e.name.as_str()).collect();
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(names.len(), unique.len());
    assert!(names.iter().all(|n| !n.is_empty() && !n.contains('/')));

    // A name that is both an object and a prefix lists as a directory
    assert!(items.contains(&entry("notes", FileKind::Directory)));
    assert!(items.contains(&entry("x.txt", FileKind::File)));
}

#[tokio::test]
async fn test_ls_missing_directory_is_empty() {
    let fs = common::setup_test_fs();
    common::put(&fs, "docs/a.txt", b"a").await;

    let items = fs.list_children(&fs.path("nothing-here")).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_ls_unknown_container_is_store_unavailable() {
    let fs = common::setup_test_fs();

    let result = fs.list_children(&VirtualPath::root("elsewhere")).await;
    assert!(matches!(result, Err(FsError::StoreUnavailable { .. })));
}

#[tokio::test]
async fn test_ls_names_with_reserved_characters_round_trip() {
    let fs = common::setup_test_fs();
    common::put(&fs, "docs/report[1] 50%.txt", b"report").await;
    common::put(&fs, "docs/q#2/notes.txt", b"notes").await;

    let items = fs.list_children(&fs.path("docs")).await.unwrap();
    assert_eq!(
        items,
        vec![
            entry("q#2", FileKind::Directory),
            entry("report[1] 50%.txt", FileKind::File),
        ]
    );

    // Listed names address the same objects
    let docs = fs.path("docs");
    let file = docs.join(&items[1].name);
    assert_eq!(fs.read(&file).await.unwrap().as_ref(), b"report");
    assert!(fs.stat(&file).await.unwrap().is_file());
    let nested = fs.list_children(&docs.join(&items[0].name)).await.unwrap();
    assert_eq!(nested, vec![entry("notes.txt", FileKind::File)]);
}
