use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabValue {
    Numeric(f64),
    Text(String),
}

impl LabValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLabResult {
    pub test_name: String,
    pub value: LabValue,
    pub unit: String,
    pub min_range: f64,
    pub max_range: f64,
    pub reference_range: Option<String>,
    pub category: Option<String>,
}

impl ParsedLabResult {
    // min_range == 0 && max_range == 0 is the "no range known" sentinel.
    pub fn has_reference_range(&self) -> bool {
        self.min_range != 0.0 || self.max_range != 0.0
    }

    pub fn is_out_of_range(&self) -> bool {
        let Some(value) = self.value.as_numeric() else {
            return false;
        };
        if !self.has_reference_range() {
            return false;
        }
        value < self.min_range || value > self.max_range
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReportManifest {
    pub manifest_version: u32,
    pub report_id: String,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub dictionary_entry_count: usize,
    pub line_count: usize,
    pub result_count: usize,
    pub results: Vec<ParsedLabResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub result_count: usize,
    pub abnormal_count: usize,
    pub test_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub report_id: String,
    pub result_count: usize,
    pub abnormal_count: usize,
    pub categories: Vec<CategorySummary>,
}
