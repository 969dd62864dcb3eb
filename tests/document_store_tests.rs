//! Directory-backed document listing and previews
use docpreview::document::DocumentError;
use docpreview::{DocumentStore, PreviewFormatter, Theme};
use std::fs;

#[test]
fn test_list_is_sorted_and_skips_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.md"), "# B").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    let store = DocumentStore::open(dir.path()).unwrap();
    let names: Vec<String> = store.list().unwrap().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["a.txt", "b.md"]);
}

#[test]
fn test_content_is_read_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "first").unwrap();

    let store = DocumentStore::open(dir.path()).unwrap();
    assert_eq!(store.content("notes.md").unwrap(), "first");

    fs::write(&path, "second").unwrap();
    assert_eq!(store.content("notes.md").unwrap(), "second");
}

#[test]
fn test_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.content("ghost.md"),
        Err(DocumentError::NotFound(_))
    ));
}

#[test]
fn test_preview_uses_document_name_as_title() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc.md"), "# Heading").unwrap();
    fs::write(dir.path().join("doc.txt"), "# Heading").unwrap();

    let store = DocumentStore::open(dir.path()).unwrap();
    let formatter = PreviewFormatter::new(Theme::minimal()).unwrap();

    let md = store.preview("doc.md", &formatter).unwrap();
    assert!(md.as_str().contains(r#"<span class="heading">#</span>"#));

    let txt = store.preview("doc.txt", &formatter).unwrap();
    assert!(!txt.as_str().contains(r#"class="heading""#));
    assert!(txt.as_str().contains("# Heading"));
}
