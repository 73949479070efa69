use chrono::NaiveDate;

/// A period column retained from the source sheet: the original header text
/// and the calendar date it parsed to.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub label: String,
    pub date: NaiveDate,
}

/// One category row of the cleaned sheet, aligned with the sheet's periods.
/// A `None` cell means the source held nothing numeric at that period.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// The cleaned sheet: category rows over chronologically sorted periods.
#[derive(Debug, Clone)]
pub struct CleanSheet {
    pub periods: Vec<Period>,
    pub rows: Vec<CategoryRow>,
}

impl CleanSheet {
    pub fn row(&self, label: &str) -> Option<&CategoryRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}
