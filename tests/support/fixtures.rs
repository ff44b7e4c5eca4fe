use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use fontpad::{ClipboardHistory, Dispatcher, EditorInfo, FontCatalog};
use tempfile::TempDir;

use super::mock_connection::MockConnection;

/// A dispatcher over a throwaway font directory. Keep the `TempDir` alive
/// for as long as the dispatcher is used.
pub fn dispatcher() -> (Dispatcher<MockConnection>, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let clipboard = Arc::new(ClipboardHistory::default());
    let fonts = Arc::new(FontCatalog::new(dir.path().join("fonts")));
    (Dispatcher::new(clipboard, fonts), dir)
}

/// Same as [`dispatcher`] with a text session already started.
pub fn active_dispatcher() -> (Dispatcher<MockConnection>, TempDir) {
    let (mut d, dir) = dispatcher();
    d.start_input(MockConnection::empty(), EditorInfo::default());
    (d, dir)
}

/// Write a fake font file; the catalog never parses font data.
pub fn write_font(dir: &std::path::Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("font dir");
    let path = dir.join(name);
    fs::write(&path, b"\x00\x01\x00\x00fake").expect("write font");
    path
}

pub fn conn(d: &Dispatcher<MockConnection>) -> &MockConnection {
    d.connection().expect("active session")
}
