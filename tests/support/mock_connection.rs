use fontpad::{CommitText, InputConnection, KeyEvent};
use ropey::Rope;

/// In-memory text field. Cursor and selection are char offsets.
pub struct MockConnection {
    rope: Rope,
    cursor: usize,
    selection: Option<(usize, usize)>,
    pub commits: Vec<CommitText>,
    pub key_events: Vec<KeyEvent>,
}

impl MockConnection {
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let cursor = rope.len_chars();
        Self {
            rope,
            cursor,
            selection: None,
            commits: Vec::new(),
            key_events: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let (start, end) = (start.min(len), end.min(len));
        self.selection = Some((start.min(end), start.max(end)));
        self.cursor = start.max(end);
    }

    pub fn committed_text(&self) -> Vec<String> {
        self.commits.iter().map(|c| c.text.clone()).collect()
    }

    pub fn last_commit(&self) -> Option<&CommitText> {
        self.commits.last()
    }
}

impl InputConnection for MockConnection {
    fn commit_text(&mut self, text: CommitText, _cursor: i32) {
        if let Some((start, end)) = self.selection.take() {
            self.rope.remove(start..end);
            self.cursor = start;
        }
        self.rope.insert(self.cursor, &text.text);
        self.cursor += text.text.chars().count();
        self.commits.push(text);
    }

    fn delete_surrounding_text(&mut self, before: u32, after: u32) {
        let start = self.cursor.saturating_sub(before as usize);
        let end = (self.cursor + after as usize).min(self.rope.len_chars());
        self.rope.remove(start..end);
        self.cursor = start;
        self.selection = None;
    }

    fn selected_text(&self) -> Option<String> {
        self.selection
            .map(|(start, end)| self.rope.slice(start..end).to_string())
    }

    fn send_key_event(&mut self, event: KeyEvent) {
        self.key_events.push(event);
    }
}
