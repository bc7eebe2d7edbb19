use serde::{Deserialize, Serialize};

/// One rendered row: display cells plus the id the row resolves to when
/// it is selected for a mutation. Rows from keyless views carry `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub key: Option<i64>,
    pub cells: Vec<String>,
}

/// An ephemeral query result shaped for the data grid: ordered column
/// names and one display-text cell per scalar value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableGrid {
    pub columns: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl TableGrid {
    /// The key of the row at `index`, if that row exists and carries one.
    pub fn key_at(&self, index: usize) -> Option<i64> {
        self.rows.get(index).and_then(|row| row.key)
    }
}

/// Outcome of a mutating action: whether it applied, and the re-run view
/// when it did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub applied: bool,
    pub grid: Option<TableGrid>,
}
