//! Table rendering utilities for CLI outputs.
//! Widths are measured in terminal columns, so CJK values line up.

use unicode_width::UnicodeWidthStr;

pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let mut line = |cells: &[String]| {
            let mut l = String::new();
            for (i, w) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                l.push_str(cell);
                l.push_str(&" ".repeat(w - cell.width() + 1));
            }
            out.push_str(l.trim_end());
            out.push('\n');
        };

        line(&self.headers);
        for row in &self.rows {
            line(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_wide_characters_by_display_width() {
        let mut t = Table::new(["#", "内容"]);
        t.add_row(vec!["1".into(), "会議".into()]);
        t.add_row(vec!["2".into(), "ab".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "# 内容");
        assert_eq!(lines[1], "1 会議");
        assert_eq!(lines[2], "2 ab");
    }
}
