//! Terminal rendering of records and session headers

use crate::models::RecordFields;
use crate::state::SessionState;
use colored::Colorize;

/// Banner printed once at session start
pub fn banner(annotator: &str) -> String {
    format!("# CSV Annotation Tool - Annotator: {}", annotator)
        .cyan()
        .bold()
        .to_string()
}

/// Render a record's read-only fields with its position in the dataset
pub fn render_record(
    fields: &RecordFields,
    position: usize,
    state: &SessionState,
    wrap_width: usize,
) -> String {
    let mut out = String::new();
    out.push_str(
        &format!(
            "── Row {} of {} ({}) ──",
            position + 1,
            state.total,
            state.summary()
        )
        .bright_black()
        .to_string(),
    );
    out.push('\n');

    for (label, value) in fields.labeled() {
        out.push_str(&format!("{}\n", label.green().bold()));
        for line in wrap(value, wrap_width) {
            out.push_str("   ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Greedy word wrap. Existing line breaks are kept and words longer than
/// `width` are left whole.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
