use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ParseArgs;
use crate::dictionary::TestDictionary;
use crate::model::ParseReportManifest;
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

use super::pipeline::parse_lab_results;

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: ParseArgs) -> Result<()> {
    let report_id = format!("parse-{}", utc_compact_string(Utc::now()));

    let dictionary = match args.dictionary_path.as_deref() {
        Some(path) => TestDictionary::load_from_path(path)?,
        None => TestDictionary::default(),
    };

    info!(
        report_id = %report_id,
        input = %args.input.display(),
        dictionary_entries = dictionary.len(),
        "starting parse"
    );

    let lines = read_extracted_lines(&args.input)?;
    let source_sha256 = sha256_file(&args.input)?;

    let results = parse_lab_results(&lines, &dictionary);

    if results.is_empty() {
        warn!(
            input = %args.input.display(),
            line_count = lines.len(),
            "no lab results recognized; raw-text review recommended"
        );
    }

    let manifest = ParseReportManifest {
        manifest_version: MANIFEST_VERSION,
        report_id,
        generated_at: now_utc_string(),
        source_path: args.input.display().to_string(),
        source_sha256,
        dictionary_entry_count: dictionary.len(),
        line_count: lines.len(),
        result_count: results.len(),
        results,
    };

    match args.output.as_deref() {
        Some(path) => {
            write_json_pretty(path, &manifest)?;
            info!(
                path = %path.display(),
                result_count = manifest.result_count,
                "wrote parse report"
            );
        }
        None => {
            let rendered = serde_json::to_string_pretty(&manifest)
                .context("failed to serialize parse report")?;
            println!("{rendered}");
            info!(result_count = manifest.result_count, "parse completed");
        }
    }

    Ok(())
}

// The extractor contract, re-established over a file: one text run per
// line, trimmed, empties dropped.
fn read_extracted_lines(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
