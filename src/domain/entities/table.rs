use crate::domain::entities::raw::{RawRow, RawValue};

/// A derived view laid out as header plus value rows, ready for a codec.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl TabularData {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
    }

    #[allow(dead_code)]
    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|values| {
                self.columns
                    .iter()
                    .zip(values.iter())
                    .fold(RawRow::new(), |row, (label, value)| {
                        row.with(label.clone(), value.clone())
                    })
            })
            .collect()
    }
}
