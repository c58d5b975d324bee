use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub const GENERAL_CATEGORY: &str = "General";

/// Known-test-name lookup table: canonical test name to clinical category.
///
/// Keys are kept sorted longest-first so multi-word names ("Hemoglobin A1c")
/// are matched before their shorter prefixes ("Hemoglobin").
#[derive(Debug, Clone)]
pub struct TestDictionary {
    categories: HashMap<String, String>,
    ordered_keys: Vec<String>,
    ordered_keys_lower: Vec<String>,
}

impl Default for TestDictionary {
    fn default() -> Self {
        Self::from_entries(default_entries())
    }
}

impl TestDictionary {
    pub fn from_entries(mut entries: HashMap<String, String>) -> Self {
        entries.retain(|key, _| !key.is_empty());

        let mut ordered_keys = entries.keys().cloned().collect::<Vec<String>>();
        ordered_keys.sort_by(|left, right| right.len().cmp(&left.len()).then(left.cmp(right)));

        let ordered_keys_lower = ordered_keys
            .iter()
            .map(|key| key.to_ascii_lowercase())
            .collect::<Vec<String>>();

        Self {
            categories: entries,
            ordered_keys,
            ordered_keys_lower,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.ordered_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_keys.is_empty()
    }

    /// Longest-first substring match of a dictionary key against an
    /// already-lowercased line.
    pub fn find_match(&self, line_lower: &str) -> Option<&str> {
        self.ordered_keys
            .iter()
            .zip(&self.ordered_keys_lower)
            .find(|(_, key_lower)| line_lower.contains(key_lower.as_str()))
            .map(|(key, _)| key.as_str())
    }

    pub fn category_of(&self, key: &str) -> Option<&str> {
        self.categories.get(key).map(String::as_str)
    }

    /// Fallback-pass name validation: the candidate equals a key
    /// case-insensitively, or contains one.
    pub fn is_known_name(&self, candidate: &str) -> bool {
        let candidate_lower = candidate.trim().to_ascii_lowercase();
        self.ordered_keys_lower
            .iter()
            .any(|key_lower| *key_lower == candidate_lower || candidate_lower.contains(key_lower.as_str()))
    }

    /// Category for a test name that did not come from a direct key match:
    /// loose-normalized exact match first, then containment, else "General".
    pub fn resolve_category(&self, test_name: &str) -> String {
        let normalized = normalize_loose(test_name);

        let exact = self
            .ordered_keys
            .iter()
            .find(|key| normalize_loose(key) == normalized)
            .and_then(|key| self.categories.get(key.as_str()));
        if let Some(category) = exact {
            return category.clone();
        }

        let contained = self
            .ordered_keys
            .iter()
            .find(|key| normalized.contains(&normalize_loose(key)))
            .and_then(|key| self.categories.get(key.as_str()));
        match contained {
            Some(category) => category.clone(),
            None => GENERAL_CATEGORY.to_string(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ordered_keys
            .iter()
            .map(|key| (key.as_str(), self.categories[key].as_str()))
    }
}

/// Lowercase and strip everything outside `[a-z0-9]`, so key comparisons
/// survive punctuation and spacing drift between extraction runs.
pub fn normalize_loose(input: &str) -> String {
    input
        .chars()
        .map(|character| character.to_ascii_lowercase())
        .filter(|character| character.is_ascii_alphanumeric())
        .collect()
}

fn default_entries() -> HashMap<String, String> {
    let mut map = HashMap::new();

    let mut insert = |name: &str, category: &str| {
        map.insert(name.to_string(), category.to_string());
    };

    // Hematology
    insert("Hemoglobin", "Hematology");
    insert("Packed Cell Volume", "Hematology");
    insert("Hematocrit", "Hematology");
    insert("RBC Count", "Hematology");
    insert("Red Blood Cell Count", "Hematology");
    insert("Total Leucocyte Count", "Hematology");
    insert("WBC Count", "Hematology");
    insert("White Blood Cell Count", "Hematology");
    insert("Platelet Count", "Hematology");
    insert("MCV", "Hematology");
    insert("MCHC", "Hematology");
    insert("MCH", "Hematology");
    insert("RDW", "Hematology");
    insert("ESR", "Hematology");
    insert("Erythrocyte Sedimentation Rate", "Hematology");
    insert("Neutrophils", "Hematology");
    insert("Lymphocytes", "Hematology");
    insert("Monocytes", "Hematology");
    insert("Eosinophils", "Hematology");
    insert("Basophils", "Hematology");

    // Diabetes
    insert("Hemoglobin A1c", "Diabetes");
    insert("HbA1c", "Diabetes");
    insert("Estimated Average Glucose", "Diabetes");
    insert("Glucose Fasting", "Diabetes");
    insert("Glucose Postprandial", "Diabetes");
    insert("Glucose Random", "Diabetes");

    // Lipid profile
    insert("Total Cholesterol", "Lipid Profile");
    insert("Cholesterol", "Lipid Profile");
    insert("Triglycerides", "Lipid Profile");
    insert("HDL Cholesterol", "Lipid Profile");
    insert("LDL Cholesterol", "Lipid Profile");
    insert("VLDL Cholesterol", "Lipid Profile");
    insert("Non-HDL Cholesterol", "Lipid Profile");

    // Liver function
    insert("Bilirubin Total", "Liver Function");
    insert("Bilirubin Direct", "Liver Function");
    insert("Bilirubin Indirect", "Liver Function");
    insert("SGPT", "Liver Function");
    insert("SGOT", "Liver Function");
    insert("Alkaline Phosphatase", "Liver Function");
    insert("Total Protein", "Liver Function");
    insert("Albumin", "Liver Function");
    insert("Globulin", "Liver Function");
    insert("GGT", "Liver Function");

    // Kidney function
    insert("Creatinine", "Kidney Function");
    insert("Blood Urea Nitrogen", "Kidney Function");
    insert("Urea", "Kidney Function");
    insert("Uric Acid", "Kidney Function");
    insert("eGFR", "Kidney Function");

    // Thyroid profile
    insert("TSH", "Thyroid Profile");
    insert("Free T3", "Thyroid Profile");
    insert("Free T4", "Thyroid Profile");
    insert("Triiodothyronine", "Thyroid Profile");
    insert("Thyroxine", "Thyroid Profile");

    // Electrolytes
    insert("Sodium", "Electrolytes");
    insert("Potassium", "Electrolytes");
    insert("Chloride", "Electrolytes");
    insert("Calcium", "Electrolytes");
    insert("Phosphorus", "Electrolytes");
    insert("Magnesium", "Electrolytes");

    // Vitamins
    insert("Vitamin D", "Vitamins");
    insert("Vitamin B12", "Vitamins");
    insert("Folate", "Vitamins");

    // Iron studies
    insert("Ferritin", "Iron Studies");
    insert("Total Iron Binding Capacity", "Iron Studies");
    insert("Transferrin Saturation", "Iron Studies");

    // Urine examination
    insert("Specific Gravity", "Urine Examination");
    insert("Urine Protein", "Urine Examination");
    insert("Urine Glucose", "Urine Examination");
    insert("Urine Ketones", "Urine Examination");
    insert("Pus Cells", "Urine Examination");

    map
}
