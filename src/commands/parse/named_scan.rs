use crate::dictionary::TestDictionary;
use crate::model::{LabValue, ParsedLabResult};

use super::classifiers::{LinePatterns, find_unit_in, is_unit};

/// Named-match scan: the current line contains a dictionary key.
///
/// Layout variants handled, in order: value (and unit) trailing on the same
/// line after the test name; value alone on the next line (numeric, or a
/// short textual result such as "Negative"); unit on the line after the
/// value; reference range on the line after that. A match without any value
/// emits nothing.
pub fn scan_named_match(
    lines: &[String],
    index: usize,
    matched_key: &str,
    dictionary: &TestDictionary,
    patterns: &LinePatterns,
    results: &mut Vec<ParsedLabResult>,
) {
    let remainder = remove_first_ignore_ascii_case(&lines[index], matched_key);

    let mut value: Option<LabValue> = None;
    let mut unit = String::new();
    let mut min_range = 0.0;
    let mut max_range = 0.0;
    let mut reference_range: Option<String> = None;
    let mut next_index = index + 1;

    if !remainder.is_empty() {
        if let Some((numeric, found_unit)) = extract_value_and_unit(&remainder, patterns) {
            value = Some(LabValue::Numeric(numeric));
            if let Some(found_unit) = found_unit {
                unit = found_unit.to_string();
            }
        }
    }

    if value.is_none() && next_index < lines.len() {
        let next_line = &lines[next_index];
        if patterns.is_number(next_line) {
            if let Ok(numeric) = next_line.parse::<f64>() {
                value = Some(LabValue::Numeric(numeric));
                next_index += 1;
            }
        } else if next_line.chars().count() < 20 {
            // A short non-numeric line is a textual result ("Negative",
            // "Yellow") unless it is itself the next test's name.
            let next_lower = next_line.to_ascii_lowercase();
            if dictionary.find_match(&next_lower).is_none() {
                value = Some(LabValue::Text(next_line.clone()));
                next_index += 1;
            }
        }
    }

    if unit.is_empty() && next_index < lines.len() && is_unit(&lines[next_index]) {
        unit = lines[next_index].clone();
        next_index += 1;
    }

    if next_index < lines.len() {
        if let Some((min, max)) = patterns.extract_range(&lines[next_index]) {
            min_range = min;
            max_range = max;
            reference_range = Some(lines[next_index].clone());
        }
    }

    let Some(value) = value else {
        return;
    };

    if results.iter().any(|result| result.test_name == matched_key) {
        return;
    }

    results.push(ParsedLabResult {
        test_name: matched_key.to_string(),
        value,
        unit,
        min_range,
        max_range,
        reference_range,
        category: dictionary.category_of(matched_key).map(str::to_string),
    });
}

/// Strip the first case-insensitive occurrence of `needle` and trim what is
/// left; that remainder is where a same-line value and unit live.
fn remove_first_ignore_ascii_case(line: &str, needle: &str) -> String {
    let line_lower = line.to_ascii_lowercase();
    let needle_lower = needle.to_ascii_lowercase();

    match line_lower.find(&needle_lower) {
        Some(start) => {
            let end = start + needle_lower.len();
            format!("{}{}", &line[..start], &line[end..])
                .trim()
                .to_string()
        }
        None => line.trim().to_string(),
    }
}

fn extract_value_and_unit(
    remainder: &str,
    patterns: &LinePatterns,
) -> Option<(f64, Option<&'static str>)> {
    let matched = patterns.first_decimal(remainder)?;
    let value = matched.parse::<f64>().ok()?;
    let rest = remainder.replacen(matched, "", 1);

    Some((value, find_unit_in(rest.trim())))
}
