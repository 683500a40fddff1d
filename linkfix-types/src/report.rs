use crate::edit::LineEdit;
use crate::rules::LinkRules;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable record of one linkfix run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkfixReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub dry_run: bool,
    pub rules: LinkRules,
    pub summary: RunSummary,

    #[serde(default)]
    pub files: Vec<FileReport>,
}

impl LinkfixReport {
    pub fn new(tool: ToolInfo, rules: LinkRules, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::LINKFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::default(),
            dry_run,
            rules,
            summary: RunSummary::default(),
            files: vec![],
        }
    }

    /// Record a processed file and fold it into the summary.
    pub fn push_file(&mut self, file: FileReport) {
        self.summary.files_scanned += 1;
        if file.changed {
            self.summary.files_changed += 1;
        }
        for edit in &file.edits {
            match edit.kind {
                crate::EditKind::Removed => self.summary.lines_removed += 1,
                crate::EditKind::Redirected => self.summary.buttons_redirected += 1,
            }
        }
        self.summary.lines_unresolved += file.unresolved.len() as u64;
        self.files.push(file);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_scanned: u64,
    pub files_changed: u64,
    pub lines_removed: u64,
    pub buttons_redirected: u64,
    pub lines_unresolved: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: Utf8PathBuf,
    pub changed: bool,
    /// False for unchanged files and for every file in a dry run.
    pub written: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<LineEdit>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}
