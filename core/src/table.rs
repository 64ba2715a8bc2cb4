//! Plain-text table pages, the render target of every list view.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub title:         String,
    pub description:   String,
    pub columns:       Vec<&'static str>,
    pub rows:          Vec<Vec<String>>,
    /// Shown as the single body row when nothing matches.
    pub empty_message: &'static str,
}

impl TablePage {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = format!("{}\n{}\n\n", self.title, self.description);
        out.push_str(&line(self.columns.clone()));
        out.push('\n');
        let rule: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule));
        out.push('\n');

        if self.rows.is_empty() {
            out.push_str(self.empty_message);
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&line(row.iter().map(String::as_str).collect()));
            out.push('\n');
        }
        out
    }
}
