// Integration tests for the rename engine module

use std::fs::{self, File};
use std::io::Write;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use batch_rename::rename_engine::{
    generate_ops, ConfigBuilder, ItemKind, ListOutcome, OrderedSelection, Pattern, RenameEngine,
    RenameOp, SortKey,
};

fn engine_for(dir: &TempDir, kind: ItemKind) -> RenameEngine {
    let config = ConfigBuilder::new()
        .directory(dir.path())
        .item_kind(kind)
        .build()
        .unwrap();
    RenameEngine::new(config)
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) {
    let mut file = File::create(dir.path().join(name)).unwrap();
    file.write_all(contents).unwrap();
}

fn listed(engine: &RenameEngine) -> Vec<String> {
    match engine.list_items().unwrap() {
        ListOutcome::Found(names) => names,
        ListOutcome::Empty => Vec::new(),
    }
}

#[test]
fn test_listing_separates_files_from_folders() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.txt", b"a");
    write_file(&dir, "b.txt", b"b");
    fs::create_dir(dir.path().join("nested")).unwrap();

    let files_engine = engine_for(&dir, ItemKind::Files);
    let mut files = listed(&files_engine);
    files.sort();
    assert_eq!(files, vec!["a.txt", "b.txt"]);

    let folders_engine = engine_for(&dir, ItemKind::Folders);
    assert_eq!(listed(&folders_engine), vec!["nested"]);
}

#[test]
fn test_listing_files_in_folder_only_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("only_a_folder")).unwrap();

    let engine = engine_for(&dir, ItemKind::Files);
    assert_eq!(engine.list_items().unwrap(), ListOutcome::Empty);
}

#[test]
fn test_listing_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = ConfigBuilder::new()
        .directory(dir.path().join("gone"))
        .item_kind(ItemKind::Files)
        .build()
        .unwrap();

    assert!(RenameEngine::new(config).list_items().is_err());
}

#[test]
fn test_sort_by_size_ascending() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "big.txt", &[0u8; 300]);
    write_file(&dir, "small.txt", &[0u8; 10]);
    write_file(&dir, "medium.txt", &[0u8; 100]);

    let engine = engine_for(&dir, ItemKind::Files);
    let names: Vec<String> = ["big.txt", "small.txt", "medium.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let sorted = engine.sort_entries(Some(SortKey::Size), &names);

    assert_eq!(sorted, vec!["small.txt", "medium.txt", "big.txt"]);
}

#[test]
fn test_sort_by_date_ascending() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "oldest.txt", b"1");
    thread::sleep(Duration::from_millis(30));
    write_file(&dir, "middle.txt", b"2");
    thread::sleep(Duration::from_millis(30));
    write_file(&dir, "newest.txt", b"3");

    let engine = engine_for(&dir, ItemKind::Files);
    let names: Vec<String> = ["newest.txt", "oldest.txt", "middle.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let sorted = engine.sort_entries(Some(SortKey::Date), &names);

    assert_eq!(sorted, vec!["oldest.txt", "middle.txt", "newest.txt"]);
}

#[test]
fn test_sort_keeps_vanished_entries_without_panicking() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "here.txt", b"x");

    let engine = engine_for(&dir, ItemKind::Files);
    let names = vec!["ghost.txt".to_string(), "here.txt".to_string()];

    let sorted = engine.sort_entries(Some(SortKey::Date), &names);

    assert_eq!(sorted.len(), 2);
    assert!(sorted.contains(&"ghost.txt".to_string()));
    assert!(sorted.contains(&"here.txt".to_string()));
}

#[tokio::test]
async fn test_numbering_batch_renames_in_order() {
    let dir = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        write_file(&dir, name, b"x");
    }

    let engine = engine_for(&dir, ItemKind::Files);
    let selection = OrderedSelection::new(vec![
        "a.txt".to_string(),
        "b.txt".to_string(),
        "c.txt".to_string(),
    ]);
    let ops = generate_ops(&selection, &Pattern::Numbering);

    let outcomes = engine.apply_renames(&ops).await;

    assert!(outcomes.iter().all(|o| o.success));
    for name in ["1.txt", "2.txt", "3.txt"] {
        assert!(dir.path().join(name).exists());
    }
    for name in ["a.txt", "b.txt", "c.txt"] {
        assert!(!dir.path().join(name).exists());
    }
}

#[tokio::test]
async fn test_prefix_rename_and_strip_round_trip() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "report.pdf", b"pdf");

    let engine = engine_for(&dir, ItemKind::Files);
    let selection = OrderedSelection::new(vec!["report.pdf".to_string()]);
    let pattern = Pattern::Prefix {
        term: "final_".to_string(),
    };

    let ops = generate_ops(&selection, &pattern);
    assert_eq!(ops[0].new_name, "final_report.pdf");

    let outcomes = engine.apply_renames(&ops).await;
    assert!(outcomes[0].success);
    assert!(dir.path().join("final_report.pdf").exists());

    // Stripping the term again restores the original name
    let inverse: Vec<RenameOp> = ops
        .iter()
        .map(|op| RenameOp {
            old_name: op.new_name.clone(),
            new_name: op.old_name.clone(),
        })
        .collect();

    let outcomes = engine.apply_renames(&inverse).await;
    assert!(outcomes[0].success);
    assert!(dir.path().join("report.pdf").exists());
}

#[tokio::test]
async fn test_suffix_rename() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "photo.png", b"png");

    let engine = engine_for(&dir, ItemKind::Files);
    let selection = OrderedSelection::new(vec!["photo.png".to_string()]);
    let pattern = Pattern::Suffix {
        term: "_v2".to_string(),
    };

    let outcomes = engine
        .apply_renames(&generate_ops(&selection, &pattern))
        .await;

    assert!(outcomes[0].success);
    assert!(dir.path().join("photo_v2.png").exists());
    assert!(!dir.path().join("photo.png").exists());
}

#[tokio::test]
async fn test_failed_item_does_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        write_file(&dir, name, b"x");
    }

    let engine = engine_for(&dir, ItemKind::Files);
    let selection = OrderedSelection::new(vec![
        "a.txt".to_string(),
        "b.txt".to_string(),
        "c.txt".to_string(),
    ]);
    let ops = generate_ops(&selection, &Pattern::Numbering);

    // The middle entry vanishes between generation and execution
    fs::remove_file(dir.path().join("b.txt")).unwrap();

    let outcomes = engine.apply_renames(&ops).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].success);
    assert!(!outcomes[1].success);
    assert!(outcomes[1].error_message.is_some());
    assert!(outcomes[2].success);

    assert!(dir.path().join("1.txt").exists());
    assert!(!dir.path().join("2.txt").exists());
    assert!(dir.path().join("3.txt").exists());
}

#[tokio::test]
async fn test_second_apply_fails_every_item_without_panicking() {
    let dir = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt"] {
        write_file(&dir, name, b"x");
    }

    let engine = engine_for(&dir, ItemKind::Files);
    let selection = OrderedSelection::new(vec!["a.txt".to_string(), "b.txt".to_string()]);
    let ops = generate_ops(&selection, &Pattern::Numbering);

    let first = engine.apply_renames(&ops).await;
    assert!(first.iter().all(|o| o.success));

    let second = engine.apply_renames(&ops).await;
    assert!(second.iter().all(|o| !o.success));
    assert!(second.iter().all(|o| o.error_message.is_some()));
}
