use serde::{Deserialize, Serialize};

/// How a single physical line relates to the link rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClass {
    /// No target reference on the line.
    Unrelated,
    /// Target reference inside a complete one-line `<li>...</li>` entry.
    NavItem,
    /// Target reference on a line carrying the button marker.
    Button,
    /// Target reference that matches neither rule. Left for a human to review.
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Removed,
    Redirected,
}

/// One line that was dropped or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEdit {
    /// 1-based line number in the input document.
    pub line: usize,
    pub kind: EditKind,
    /// Original line content with surrounding whitespace trimmed.
    pub text: String,
}

/// Result of transforming one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Output lines, each with its original terminator.
    pub lines: Vec<String>,
    pub changed: bool,
    pub edits: Vec<LineEdit>,
    /// 1-based numbers of lines that reference the target but were left alone.
    pub unresolved: Vec<usize>,
}

impl RewriteOutcome {
    /// Reassemble the output document.
    pub fn text(&self) -> String {
        self.lines.concat()
    }

    pub fn removed(&self) -> usize {
        self.count(EditKind::Removed)
    }

    pub fn redirected(&self) -> usize {
        self.count(EditKind::Redirected)
    }

    fn count(&self, kind: EditKind) -> usize {
        self.edits.iter().filter(|e| e.kind == kind).count()
    }
}
