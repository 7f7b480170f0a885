//! Turning live workspace state plus stored names into display rows, and
//! reading a chosen row back.
//!
//! Everything here is a pure function of its inputs.

use crate::store::NameStore;

/// Label shown on the trailing workspace while dynamic workspaces are on.
pub const NEW_WORKSPACE_LABEL: &str = "New Workspace";

/// Live workspace state, re-fetched on every refresh and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Number of workspaces the window manager reports.
    pub count: usize,
    /// 0-based active workspace, if one was found.
    pub active: Option<usize>,
    /// Whether dynamic workspaces are enabled.
    pub dynamic: bool,
}

/// One row of the merged view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// 0-based workspace index.
    pub index: usize,
    pub label: String,
    pub active: bool,
}

impl DisplayRow {
    /// 1-based workspace number as shown to the user.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Merge `snapshot` and the stored names into one row per live workspace.
pub fn merge_rows(snapshot: &Snapshot, names: &NameStore) -> Vec<DisplayRow> {
    (0..snapshot.count)
        .map(|i| {
            let label = if snapshot.dynamic && i + 1 == snapshot.count {
                NEW_WORKSPACE_LABEL.to_string()
            } else {
                names.label(i)
            };
            DisplayRow {
                index: i,
                label,
                active: snapshot.active == Some(i),
            }
        })
        .collect()
}

/// How the active row is distinguished in rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveMarker {
    /// Plain listing: the active row looks like every other row.
    None,
    /// Pango markup for the fuzzy-finder, e.g. `<span foreground='#ff5555'>`.
    Span { color: String },
}

/// Format rows as `"N: label"` lines, wrapping the active one per `marker`.
pub fn render_lines(rows: &[DisplayRow], marker: &ActiveMarker) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let line = format!("{}: {}", row.number(), row.label);
            match marker {
                ActiveMarker::Span { color } if row.active => {
                    format!("<span foreground='{}'>{}</span>", color, line)
                }
                _ => line,
            }
        })
        .collect()
}

/// A line chosen by the user, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// 1-based workspace number as written in the line.  Not range-checked.
    pub index: i64,
    pub label: String,
}

/// Errors from parsing a selected line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("empty input")]
    Empty,
    #[error("invalid format: expected 'idx: name', got {0:?}")]
    MissingColon(String),
    #[error("invalid workspace index {0:?}")]
    BadIndex(String),
}

/// Drop `<…>` markup tags, leaving the text between them.
fn strip_markup(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Parse an `"N: label"` line coming back from the fuzzy-finder or stdin.
///
/// The input is untrusted: the only structure relied upon is that the first
/// colon separates the index from the label.  Markup wrapped around the
/// active row is removed first.
pub fn parse_selection(line: &str) -> Result<Selection, SelectionError> {
    let plain = strip_markup(line);
    let plain = plain.trim();
    if plain.is_empty() {
        return Err(SelectionError::Empty);
    }
    let (head, tail) = plain
        .split_once(':')
        .ok_or_else(|| SelectionError::MissingColon(plain.to_string()))?;
    let head = head.trim();
    let index = head
        .parse::<i64>()
        .map_err(|_| SelectionError::BadIndex(head.to_string()))?;
    Ok(Selection {
        index,
        label: tail.trim().to_string(),
    })
}
