//! Pure line classification and document transformation.

use linkfix_types::{EditKind, LineClass, LineEdit, LinkRules, RewriteOutcome};

/// Classify one physical line. Rules are checked in priority order.
pub fn classify_line(line: &str, rules: &LinkRules) -> LineClass {
    if !line.contains(&rules.target_href) {
        LineClass::Unrelated
    } else if line.contains(&rules.item_open) && line.contains(&rules.item_close) {
        LineClass::NavItem
    } else if line.contains(&rules.button_marker) {
        LineClass::Button
    } else {
        LineClass::Unresolved
    }
}

/// Transform a whole document.
///
/// Lines keep their original terminators, so concatenating
/// [`RewriteOutcome::lines`] reproduces every untouched byte.
pub fn rewrite_lines(text: &str, rules: &LinkRules) -> RewriteOutcome {
    let mut out = RewriteOutcome::default();

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let number = idx + 1;
        match classify_line(line, rules) {
            LineClass::Unrelated => out.lines.push(line.to_string()),
            LineClass::NavItem => {
                out.edits.push(LineEdit {
                    line: number,
                    kind: EditKind::Removed,
                    text: line.trim().to_string(),
                });
            }
            LineClass::Button => {
                out.edits.push(LineEdit {
                    line: number,
                    kind: EditKind::Redirected,
                    text: line.trim().to_string(),
                });
                out.lines.push(line.replace(&rules.target_href, &rules.redirect_href));
            }
            LineClass::Unresolved => {
                out.unresolved.push(number);
                out.lines.push(line.to_string());
            }
        }
    }

    out.changed = !out.edits.is_empty();
    out
}
