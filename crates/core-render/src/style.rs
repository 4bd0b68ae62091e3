//! Row render model for match items.
//!
//! Items arrive partitioned into unmatched/matched slices; rendering flattens
//! each item into one title row of spans (plus an optional subtext row)
//! without ever re-deriving match positions. Invariant: concatenating the
//! span texts of a title row reconstructs the item's display text exactly.

use core_events::Item;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    /// Substring that satisfied the filter; highlighted by the host.
    Match,
    Subtext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpan {
    pub kind: SpanKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub spans: Vec<RowSpan>,
    pub subtext: Option<String>,
    pub icon: Option<String>,
    pub selected: bool,
}

impl Row {
    /// Display columns of the title line.
    pub fn title_width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    pub fn title_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Flatten items into rows; `selected` overrides the per-item flags so the
/// marker follows `select` pushes without waiting for the next filter result.
pub fn render_rows(items: &[Item], selected: Option<usize>) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut spans = Vec::with_capacity(item.partitions.len() * 2);
            for partition in &item.partitions {
                if !partition.unmatched.is_empty() {
                    spans.push(RowSpan {
                        kind: SpanKind::Plain,
                        text: partition.unmatched.clone(),
                    });
                }
                if !partition.matched.is_empty() {
                    spans.push(RowSpan {
                        kind: SpanKind::Match,
                        text: partition.matched.clone(),
                    });
                }
            }
            Row {
                spans,
                subtext: item.data.subtext.clone(),
                icon: item.data.icon.clone(),
                selected: selected == Some(index),
            }
        })
        .collect()
}
