//! Renders tasks as an aligned table.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::formatted;
use crate::resource::Task;

/// Printed instead of a table when there is nothing to list.
pub const EMPTY_MESSAGE: &str = "No tasks found";

/// Spaces between columns.
const PADDING: usize = 3;

/// Orders tasks most recent first; ties by name, then namespace.
///
/// Tasks without a creation timestamp go last.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare);
}

fn compare(a: &Task, b: &Task) -> Ordering {
    let by_age = match (a.metadata.creation_timestamp, b.metadata.creation_timestamp) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_age.then_with(|| a.name().cmp(b.name())).then_with(|| a.namespace().cmp(b.namespace()))
}

/// Table layout options for `task list`.
#[derive(Debug, Clone, Copy)]
pub struct TableFormatter {
    all_namespaces: bool,
    headers: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self {
            all_namespaces: false,
            headers: true,
        }
    }
}

impl TableFormatter {
    /// Adds a leading `NAMESPACE` column.
    #[must_use]
    pub fn all_namespaces(mut self, enabled: bool) -> Self {
        self.all_namespaces = enabled;
        self
    }

    /// Whether to emit the header row.
    #[must_use]
    pub fn headers(mut self, enabled: bool) -> Self {
        self.headers = enabled;
        self
    }

    /// Lines of output for `tasks`, ages measured against `now`.
    ///
    /// Tasks are sorted with [`sort_tasks`] first. An empty slice yields just
    /// [`EMPTY_MESSAGE`].
    #[must_use]
    pub fn lines(&self, tasks: &[Task], now: DateTime<Utc>) -> Lines {
        if tasks.is_empty() {
            return Lines::new(vec![vec![EMPTY_MESSAGE.to_string()]]);
        }

        let mut sorted = tasks.to_vec();
        sort_tasks(&mut sorted);

        let mut rows = Vec::with_capacity(sorted.len() + 1);
        if self.headers {
            let mut header = vec!["NAME".to_string(), "AGE".to_string()];
            if self.all_namespaces {
                header.insert(0, "NAMESPACE".to_string());
            }
            rows.push(header);
        }
        for task in &sorted {
            let mut row = vec![
                task.name().to_string(),
                formatted::optional_age(task.metadata.creation_timestamp, now),
            ];
            if self.all_namespaces {
                row.insert(0, task.namespace().to_string());
            }
            rows.push(row);
        }
        Lines::new(rows)
    }
}

/// Iterator over rendered table lines.
///
/// Column widths are fixed up front; each line is padded as it is yielded.
pub struct Lines {
    rows: std::vec::IntoIter<Vec<String>>,
    widths: Vec<usize>,
}

impl Lines {
    fn new(rows: Vec<Vec<String>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths = (0..columns)
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        Self { rows: rows.into_iter(), widths }
    }
}

impl Iterator for Lines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let row = self.rows.next()?;
        let last = row.len().saturating_sub(1);
        let mut line = String::new();
        for (col, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if col < last {
                let pad = self.widths[col] - cell.chars().count() + PADDING;
                line.push_str(&" ".repeat(pad));
            }
        }
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
