use crate::dictionary::TestDictionary;
use crate::model::{LabValue, ParsedLabResult};

use super::classifiers::{LinePatterns, is_skip_term, is_unit};

/// Generic numeric fallback: the current line matched no dictionary key.
///
/// Anchors on a bare numeric token, backtracks past sub-2-character lines
/// and header furniture to find a candidate name, and accepts the pair only
/// when the following line is a recognized unit or the candidate name is a
/// known test. Catches tests the dictionary has never heard of.
pub fn scan_numeric_fallback(
    lines: &[String],
    index: usize,
    dictionary: &TestDictionary,
    patterns: &LinePatterns,
    results: &mut Vec<ParsedLabResult>,
) {
    let current = &lines[index];
    if !patterns.is_number(current) {
        return;
    }

    let mut valid = false;
    let mut unit = String::new();
    let mut test_name = String::new();

    let unit_index = index + 1;
    if unit_index < lines.len() && is_unit(&lines[unit_index]) {
        valid = true;
        unit = lines[unit_index].clone();
    }

    if let Some(name_index) = backtrack_name_index(lines, index) {
        let candidate = &lines[name_index];
        if dictionary.is_known_name(candidate) {
            valid = true;
            test_name = candidate.clone();
        } else if valid {
            // The unit already vouched for this block; keep the unknown name.
            test_name = candidate.clone();
        }
    }

    if !valid || test_name.is_empty() {
        return;
    }

    let Ok(numeric) = current.parse::<f64>() else {
        return;
    };

    let mut min_range = 0.0;
    let mut max_range = 0.0;

    // Range usually follows the unit when one was present, otherwise the
    // value itself.
    let range_index = if unit.is_empty() { index + 1 } else { unit_index + 1 };
    if range_index < lines.len() {
        let range_line = &lines[range_index];
        if let Some((min, max)) = patterns.extract_range(range_line) {
            min_range = min;
            max_range = max;
        } else if let Some(upper) = patterns.extract_upper_bound(range_line) {
            max_range = upper;
        }
    }

    if patterns.is_number(&test_name) {
        return;
    }
    if results.iter().any(|result| result.test_name == test_name) {
        return;
    }

    let category = dictionary.resolve_category(&test_name);

    results.push(ParsedLabResult {
        test_name,
        value: LabValue::Numeric(numeric),
        unit,
        min_range,
        max_range,
        reference_range: None,
        category: Some(category),
    });
}

fn backtrack_name_index(lines: &[String], index: usize) -> Option<usize> {
    let mut name_index = index.checked_sub(1)?;

    loop {
        let candidate = &lines[name_index];
        if candidate.chars().count() >= 2 && !is_skip_term(candidate) {
            return Some(name_index);
        }
        name_index = name_index.checked_sub(1)?;
    }
}
