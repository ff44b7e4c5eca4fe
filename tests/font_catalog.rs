use std::fs;

use fontpad::{FontCatalog, FontError, FontStyle};
use tempfile::TempDir;

mod support;
use support::fixtures::write_font;

fn catalog() -> (FontCatalog, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    (FontCatalog::new(dir.path().join("fonts")), dir)
}

fn names(catalog: &FontCatalog) -> Vec<String> {
    catalog.fonts().into_iter().map(|f| f.name).collect()
}

#[test]
fn refresh_creates_missing_directory() {
    let (catalog, _dir) = catalog();
    assert!(!catalog.dir().exists());
    assert_eq!(catalog.refresh().expect("refresh"), 0);
    assert!(catalog.dir().is_dir());
}

#[test]
fn refresh_lists_only_font_files_sorted() {
    let (catalog, _dir) = catalog();
    write_font(catalog.dir(), "Zed.ttf");
    write_font(catalog.dir(), "alpha.OTF");
    write_font(catalog.dir(), "Beta.otf");
    write_font(catalog.dir(), "readme.txt");
    fs::create_dir_all(catalog.dir().join("nested.ttf")).expect("dir");

    catalog.refresh().expect("refresh");
    assert_eq!(names(&catalog), vec!["Beta.otf", "Zed.ttf", "alpha.OTF"]);
    let ids: Vec<_> = catalog.fonts().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec!["Beta", "Zed", "alpha"]);
}

#[test]
fn add_font_copies_with_unique_names() {
    let (catalog, dir) = catalog();
    catalog.refresh().expect("refresh");
    let source = write_font(&dir.path().join("src"), "Inter.ttf");

    let first = catalog.add_font(&source).expect("first");
    let second = catalog.add_font(&source).expect("second");
    let third = catalog.add_font(&source).expect("third");

    assert_eq!(first.name, "Inter.ttf");
    assert_eq!(second.name, "Inter_1.ttf");
    assert_eq!(third.id, "Inter_2");
    assert!(second.path.is_file());
    assert!(source.is_file());
    assert_eq!(names(&catalog), vec!["Inter.ttf", "Inter_1.ttf", "Inter_2.ttf"]);
}

#[test]
fn add_font_rejects_other_formats() {
    let (catalog, dir) = catalog();
    let source = write_font(dir.path(), "font.woff2");

    let err = catalog.add_font(&source).expect_err("woff2");
    assert!(matches!(err, FontError::UnsupportedFormat(ref n) if n == "font.woff2"));
    assert!(catalog.error().is_some());
    assert!(catalog.fonts().is_empty());

    catalog.clear_error();
    assert_eq!(catalog.error(), None);
}

#[test]
fn add_font_io_failure_sets_error_and_keeps_list() {
    let (catalog, dir) = catalog();
    write_font(catalog.dir(), "Keep.ttf");
    catalog.refresh().expect("refresh");

    let err = catalog
        .add_font(&dir.path().join("missing.ttf"))
        .expect_err("missing source");
    assert!(matches!(err, FontError::Io { action: "save", .. }));
    let message = catalog.error().expect("error recorded");
    assert!(message.starts_with("failed to save font"));
    assert_eq!(names(&catalog), vec!["Keep.ttf"]);
}

#[test]
fn remove_font_deletes_file() {
    let (catalog, _dir) = catalog();
    let path = write_font(catalog.dir(), "Old.ttf");
    write_font(catalog.dir(), "New.ttf");
    catalog.refresh().expect("refresh");

    catalog.remove_font("Old").expect("remove");
    assert!(!path.exists());
    assert_eq!(names(&catalog), vec!["New.ttf"]);
}

#[test]
fn remove_font_tolerates_missing_file() {
    let (catalog, _dir) = catalog();
    let path = write_font(catalog.dir(), "Ghost.ttf");
    catalog.refresh().expect("refresh");
    fs::remove_file(path).expect("remove");

    catalog.remove_font("Ghost").expect("remove");
    assert!(catalog.fonts().is_empty());
}

#[test]
fn remove_unknown_font_is_not_found() {
    let (catalog, _dir) = catalog();
    let err = catalog.remove_font("nope").expect_err("unknown");
    assert!(matches!(err, FontError::NotFound(_)));
}

#[test]
fn load_font_resolves_style_and_detects_missing_files() {
    let (catalog, _dir) = catalog();
    let path = write_font(catalog.dir(), "Lora-Italic.ttf");
    catalog.refresh().expect("refresh");

    let typeface = catalog.load_font("Lora-Italic").expect("load");
    assert_eq!(typeface.style, FontStyle::ITALIC);
    assert_eq!(typeface.path, path);

    fs::remove_file(&path).expect("remove");
    let err = catalog.load_font("Lora-Italic").expect_err("gone");
    assert!(err.is_missing_resource());
    assert!(matches!(err, FontError::MissingFile(_)));

    let err = catalog.load_font("unknown").expect_err("unknown");
    assert!(err.is_missing_resource());
}

#[test]
fn subscribers_see_catalog_changes() {
    let (catalog, dir) = catalog();
    let rx = catalog.subscribe();
    catalog.refresh().expect("refresh");
    let source = write_font(dir.path(), "Added.ttf");
    catalog.add_font(&source).expect("add");

    let counts: Vec<usize> = rx.try_iter().map(|s| s.fonts.len()).collect();
    assert_eq!(counts, vec![0, 1]);
}
