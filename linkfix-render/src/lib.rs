//! Rendering helpers (markdown) for human-readable artifacts.

use linkfix_types::EditKind;
use linkfix_types::report::LinkfixReport;

pub fn render_report_md(report: &LinkfixReport) -> String {
    let mut out = String::new();
    out.push_str("# linkfix report\n\n");
    if report.dry_run {
        out.push_str("_Dry run: no files were written._\n\n");
    }
    out.push_str(&format!(
        "- Target: {}\n- Redirect: {}\n",
        code_span(&report.rules.target_href),
        code_span(&report.rules.redirect_href)
    ));
    out.push_str(&format!(
        "- Files scanned: {}\n- Files changed: {}\n- Lines removed: {}\n- Buttons redirected: {}\n- Unresolved references: {}\n\n",
        report.summary.files_scanned,
        report.summary.files_changed,
        report.summary.lines_removed,
        report.summary.buttons_redirected,
        report.summary.lines_unresolved
    ));

    out.push_str("## Files\n\n");
    let touched: Vec<_> = report
        .files
        .iter()
        .filter(|f| f.changed || !f.unresolved.is_empty())
        .collect();
    if touched.is_empty() {
        out.push_str("_No references found._\n");
        return out;
    }

    for file in touched {
        out.push_str(&format!("### {}\n\n", code_span(file.path.as_str())));
        out.push_str(&format!("- Written: `{}`\n", file.written));
        if let (Some(before), Some(after)) = (&file.sha256_before, &file.sha256_after) {
            out.push_str(&format!("- sha256: {} → {}\n", before, after));
        }
        if !file.edits.is_empty() {
            out.push_str("\n**Edits**\n\n");
            for edit in &file.edits {
                out.push_str(&format!(
                    "- line {} {}: {}\n",
                    edit.line,
                    kind_label(edit.kind),
                    code_span(&edit.text)
                ));
            }
        }
        if !file.unresolved.is_empty() {
            let lines: Vec<String> = file.unresolved.iter().map(|n| n.to_string()).collect();
            out.push_str(&format!("\n**Needs review**: lines {}\n", lines.join(", ")));
        }
        out.push('\n');
    }

    out
}

/// Inline code span that survives backticks in `text`.
///
/// The fence is one backtick longer than the longest run inside the text, and
/// a space pads each side when the text starts or ends with a backtick.
fn code_span(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat(longest + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

fn kind_label(kind: EditKind) -> &'static str {
    match kind {
        EditKind::Removed => "removed",
        EditKind::Redirected => "redirected",
    }
}
