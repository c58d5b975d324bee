use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::DictionaryArgs;
use crate::dictionary::TestDictionary;

pub fn run(args: DictionaryArgs) -> Result<()> {
    let dictionary = match args.dictionary_path.as_deref() {
        Some(path) => TestDictionary::load_from_path(path)?,
        None => TestDictionary::default(),
    };

    let mut category_counts = BTreeMap::<&str, usize>::new();
    for (_, category) in dictionary.entries() {
        *category_counts.entry(category).or_insert(0) += 1;
    }

    info!(
        entry_count = dictionary.len(),
        category_count = category_counts.len(),
        "dictionary loaded"
    );
    for (category, entry_count) in &category_counts {
        info!(category = %category, entry_count = *entry_count, "category");
    }

    if args.json {
        let entries = dictionary.entries().collect::<BTreeMap<&str, &str>>();
        let rendered =
            serde_json::to_string_pretty(&entries).context("failed to serialize dictionary")?;
        println!("{rendered}");
    }

    Ok(())
}
