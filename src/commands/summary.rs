use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::SummaryArgs;
use crate::dictionary::GENERAL_CATEGORY;
use crate::model::{CategorySummary, ParseReportManifest, ParsedLabResult, ReportSummary};

pub fn run(args: SummaryArgs) -> Result<()> {
    let raw = fs::read(&args.report_path)
        .with_context(|| format!("failed to read {}", args.report_path.display()))?;
    let manifest: ParseReportManifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", args.report_path.display()))?;

    let summary = summarize(&manifest);

    info!(
        report_id = %summary.report_id,
        result_count = summary.result_count,
        abnormal_count = summary.abnormal_count,
        "report summary"
    );
    for category in &summary.categories {
        info!(
            category = %category.category,
            result_count = category.result_count,
            abnormal_count = category.abnormal_count,
            "category summary"
        );
    }

    if summary.result_count == 0 {
        warn!(report_id = %summary.report_id, "report holds no results; raw-text review recommended");
    }

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{rendered}");
    }

    Ok(())
}

pub fn summarize(manifest: &ParseReportManifest) -> ReportSummary {
    let abnormal_count = manifest
        .results
        .iter()
        .filter(|result| result.is_out_of_range())
        .count();

    let categories = group_by_category(&manifest.results)
        .into_iter()
        .map(|(category, members)| CategorySummary {
            category,
            result_count: members.len(),
            abnormal_count: members
                .iter()
                .filter(|result| result.is_out_of_range())
                .count(),
            test_names: members
                .iter()
                .map(|result| result.test_name.clone())
                .collect(),
        })
        .collect();

    ReportSummary {
        report_id: manifest.report_id.clone(),
        result_count: manifest.results.len(),
        abnormal_count,
        categories,
    }
}

/// Stable grouping by category; records with no category fold into
/// "General". First-seen category order and per-category record order are
/// preserved for the review view.
pub fn group_by_category(results: &[ParsedLabResult]) -> Vec<(String, Vec<&ParsedLabResult>)> {
    let mut groups = Vec::<(String, Vec<&ParsedLabResult>)>::new();

    for result in results {
        let category = match result.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => GENERAL_CATEGORY,
        };

        match groups.iter_mut().find(|(existing, _)| existing.as_str() == category) {
            Some((_, members)) => members.push(result),
            None => groups.push((category.to_string(), vec![result])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabValue;

    fn result(test_name: &str, value: f64, range: (f64, f64), category: Option<&str>) -> ParsedLabResult {
        ParsedLabResult {
            test_name: test_name.to_string(),
            value: LabValue::Numeric(value),
            unit: String::new(),
            min_range: range.0,
            max_range: range.1,
            reference_range: None,
            category: category.map(str::to_string),
        }
    }

    fn manifest_with(results: Vec<ParsedLabResult>) -> ParseReportManifest {
        ParseReportManifest {
            manifest_version: 1,
            report_id: "parse-test".to_string(),
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            source_path: "report.txt".to_string(),
            source_sha256: String::new(),
            dictionary_entry_count: 0,
            line_count: 0,
            result_count: results.len(),
            results,
        }
    }

    #[test]
    fn grouping_preserves_order_and_folds_missing_category() {
        let results = vec![
            result("Hemoglobin", 13.5, (12.0, 15.0), Some("Hematology")),
            result("Obscure Marker X", 4.2, (0.0, 0.0), None),
            result("Platelet Count", 250.0, (150.0, 400.0), Some("Hematology")),
            result("Another Marker", 1.0, (0.0, 0.0), Some("")),
        ];

        let groups = group_by_category(&results);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Hematology");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "General");
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn summarize_counts_abnormal_results_per_category() {
        let manifest = manifest_with(vec![
            result("Hemoglobin", 16.5, (12.0, 15.0), Some("Hematology")),
            result("Platelet Count", 250.0, (150.0, 400.0), Some("Hematology")),
            result("Obscure Marker X", 9999.0, (0.0, 0.0), None),
        ]);

        let summary = summarize(&manifest);

        assert_eq!(summary.result_count, 3);
        assert_eq!(summary.abnormal_count, 1);
        assert_eq!(summary.categories[0].category, "Hematology");
        assert_eq!(summary.categories[0].abnormal_count, 1);
        assert_eq!(summary.categories[1].category, "General");
        assert_eq!(summary.categories[1].abnormal_count, 0);
    }
}
