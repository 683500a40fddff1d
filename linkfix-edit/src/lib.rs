//! Rewrite engine for linkfix.
//!
//! Responsibilities:
//! - Classify lines that reference a retired page and transform documents (pure).
//! - Discover candidate files in a directory.
//! - Read, transform and write back files, touching only the ones that change.
//! - Generate a unified diff preview.

mod error;
mod rewrite;

pub use error::{EditError, EditResult};
pub use rewrite::{classify_line, rewrite_lines};

use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use linkfix_types::{LineEdit, LinkRules, RewriteOutcome};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Report edits but never write.
    pub dry_run: bool,
    /// File name suffix that selects candidates, without the leading dot.
    pub extension: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            extension: "html".to_string(),
        }
    }
}

/// Receives every edit before the file it belongs to is written.
pub trait EditObserver {
    fn on_edit(&mut self, path: &Utf8Path, edit: &LineEdit);
}

impl<F> EditObserver for F
where
    F: FnMut(&Utf8Path, &LineEdit),
{
    fn on_edit(&mut self, path: &Utf8Path, edit: &LineEdit) {
        self(path, edit)
    }
}

/// What happened to one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: Utf8PathBuf,
    pub before: String,
    pub outcome: RewriteOutcome,
    pub written: bool,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        self.outcome.changed
    }

    pub fn after(&self) -> String {
        self.outcome.text()
    }
}

/// List every entry in `dir` whose name ends with `.<extension>`, except directories.
///
/// Not recursive. The result is sorted so diagnostics come out in a stable
/// order. Files found directly under `.` are returned as bare names. Entries
/// that cannot be opened (dangling symlinks, unreadable files) are still
/// returned so that reading them fails the run. A candidate whose name is not
/// UTF-8 aborts discovery.
pub fn discover_files(dir: &Utf8Path, extension: &str) -> EditResult<Vec<Utf8PathBuf>> {
    let suffix = format!(".{extension}");
    let entries = fs::read_dir(dir).map_err(|source| EditError::ListDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| EditError::ListDir {
            dir: dir.to_path_buf(),
            source,
        })?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) if raw.as_encoded_bytes().ends_with(suffix.as_bytes()) => {
                return Err(EditError::NonUtf8Name {
                    dir: dir.to_path_buf(),
                    name: raw.to_string_lossy().into_owned(),
                });
            }
            Err(_) => continue,
        };
        if !name.ends_with(&suffix) {
            continue;
        }

        let path = if dir.as_str() == "." {
            Utf8PathBuf::from(&name)
        } else {
            dir.join(&name)
        };
        if path.is_dir() {
            debug!(path = path.as_str(), "skipping directory");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Read `path`, transform it, report edits, and write it back if anything changed.
///
/// Unchanged files are never opened for writing.
pub fn rewrite_file(
    path: &Utf8Path,
    rules: &LinkRules,
    opts: &RewriteOptions,
    observer: &mut dyn EditObserver,
) -> EditResult<FileOutcome> {
    let before = fs::read_to_string(path).map_err(|source| EditError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = rewrite_lines(&before, rules);

    for line in &outcome.unresolved {
        debug!(
            path = path.as_str(),
            line,
            "target reference matches no rule; leaving it for review"
        );
    }
    for edit in &outcome.edits {
        observer.on_edit(path, edit);
    }

    let mut written = false;
    if outcome.changed && !opts.dry_run {
        fs::write(path, outcome.text()).map_err(|source| EditError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        written = true;
        debug!(path = path.as_str(), edits = outcome.edits.len(), "wrote file");
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        before,
        outcome,
        written,
    })
}

/// Rewrite every candidate file in `dir`, one at a time.
///
/// The first error aborts the run; files already written stay written.
pub fn rewrite_dir(
    dir: &Utf8Path,
    rules: &LinkRules,
    opts: &RewriteOptions,
    observer: &mut dyn EditObserver,
) -> EditResult<Vec<FileOutcome>> {
    let files = discover_files(dir, &opts.extension)?;
    debug!(dir = dir.as_str(), count = files.len(), "discovered candidate files");

    let mut outcomes = Vec::with_capacity(files.len());
    for path in &files {
        outcomes.push(rewrite_file(path, rules, opts, observer)?);
    }
    Ok(outcomes)
}

/// Unified diff of every changed file, in processing order.
pub fn render_patch(outcomes: &[FileOutcome]) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for file in outcomes.iter().filter(|f| f.changed()) {
        let after = file.after();

        out.push_str(&format!("diff --git a/{0} b/{0}\n", file.path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", file.path));

        let patch = diffy::create_patch(&file.before, &after);
        let body = formatter.fmt_patch(&patch).to_string();
        // diffy repeats the ---/+++ header; keep only the hunks.
        let hunks = body.find("@@").map(|i| &body[i..]).unwrap_or("");
        out.push_str(hunks);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
