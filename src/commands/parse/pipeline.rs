use crate::dictionary::TestDictionary;
use crate::model::ParsedLabResult;

use super::classifiers::LinePatterns;
use super::named_scan::scan_named_match;
use super::numeric_fallback::scan_numeric_fallback;

/// Turn a flattened sequence of extracted PDF text runs into structured lab
/// results.
///
/// Two heuristics are interleaved per line: a named-match scan anchored on
/// dictionary keys, and a numeric fallback anchored on bare number tokens.
/// A line that matched a dictionary key is never also offered to the
/// fallback. The outer cursor always advances exactly one line per
/// iteration; lines consumed by lookahead stay eligible for later
/// iterations, and the one-record-per-test-name invariant keeps that from
/// duplicating output.
pub fn parse_lab_results(lines: &[String], dictionary: &TestDictionary) -> Vec<ParsedLabResult> {
    let Some(patterns) = LinePatterns::compile() else {
        return Vec::new();
    };

    let mut results = Vec::<ParsedLabResult>::new();

    for index in 0..lines.len() {
        let line_lower = lines[index].to_ascii_lowercase();

        if let Some(matched_key) = dictionary.find_match(&line_lower) {
            scan_named_match(lines, index, matched_key, dictionary, &patterns, &mut results);
            continue;
        }

        scan_numeric_fallback(lines, index, dictionary, &patterns, &mut results);
    }

    results
}
