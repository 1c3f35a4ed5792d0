use crate::model::{Column, Record};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Empty,
    Populated,
}

/// Session-wide, append-only result table.
///
/// Sequence numbers start at 1 and keep counting across passes until
/// [`Table::reset`]. Sorting reorders the display but never renumbers.
#[derive(Debug, Clone)]
pub struct Table {
    records: Vec<Record>,
    next_seq: u32,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Table {
            records: Vec::new(),
            next_seq: 1,
        }
    }

    /// Append a record with the next sequence number and return a copy of it.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> Record {
        let record = Record {
            seq: self.next_seq,
            name: name.into(),
            value: value.into(),
        };
        self.next_seq += 1;
        self.records.push(record.clone());
        record
    }

    /// Drop all records and restart numbering at 1.
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_seq = 1;
    }

    /// Reorder rows by `column`.
    ///
    /// If every cell of the column parses as an integer the sort is numeric,
    /// otherwise the whole sort is lexicographic. The sort is stable.
    pub fn sort_by(&mut self, column: Column, descending: bool) {
        let numeric: Option<Vec<i64>> = self
            .records
            .iter()
            .map(|r| cell_text(r, column).trim().parse::<i64>().ok())
            .collect();

        match numeric {
            Some(keys) => {
                let mut keyed: Vec<(i64, Record)> =
                    keys.into_iter().zip(self.records.drain(..)).collect();
                keyed.sort_by(|a, b| directed(a.0.cmp(&b.0), descending));
                self.records = keyed.into_iter().map(|(_, r)| r).collect();
            }
            None => {
                tracing::debug!(%column, "non-integer cell, sorting lexicographically");
                self.records.sort_by(|a, b| {
                    directed(cell_text(a, column).cmp(&cell_text(b, column)), descending)
                });
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self) -> TableState {
        if self.records.is_empty() {
            TableState::Empty
        } else {
            TableState::Populated
        }
    }

    /// Text of one cell in display order.
    pub fn cell(&self, row: usize, column: Column) -> Option<String> {
        self.records
            .get(row)
            .map(|r| cell_text(r, column).into_owned())
    }

    /// All rows as `name,value`, newline-joined, in display order.
    pub fn rows_as_csv(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{},{}", r.name, r.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The points column, newline-joined, in display order.
    pub fn value_column(&self) -> String {
        self.records
            .iter()
            .map(|r| r.value.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn cell_text(record: &Record, column: Column) -> std::borrow::Cow<'_, str> {
    match column {
        Column::No => record.seq.to_string().into(),
        Column::Name => record.name.as_str().into(),
        Column::Points => record.value.as_str().into(),
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}
