//! Local per-column statistics.

use sentinel_model::{CellValue, Dataset};

/// Cell kind counts for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    pub name: String,
    pub numeric: usize,
    pub text: usize,
    pub empty: usize,
}

impl ColumnProfile {
    pub fn total(&self) -> usize {
        self.numeric + self.text + self.empty
    }

    /// Every non-empty cell is numeric, and there is at least one.
    pub fn is_numeric(&self) -> bool {
        self.numeric > 0 && self.text == 0
    }

    pub fn empty_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.empty as f64 / total as f64
        }
    }
}

pub fn profile_columns(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let mut profile = ColumnProfile {
                name: name.clone(),
                numeric: 0,
                text: 0,
                empty: 0,
            };
            for cell in dataset.column_values(index) {
                match cell {
                    CellValue::Number(_) => profile.numeric += 1,
                    CellValue::Text(_) => profile.text += 1,
                    CellValue::Empty => profile.empty += 1,
                }
            }
            profile
        })
        .collect()
}
