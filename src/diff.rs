// src/diff.rs
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{DiffMap, WeightMap};

/// Previous run's weights, or an empty map when the file is missing or unreadable.
pub fn load_previous(path: &Path) -> HashMap<String, i64> {
    match read_previous(path) {
        Ok(prev) => {
            debug!("Loaded previous weights - path={}, words={}", path.display(), prev.len());
            prev
        }
        Err(e) => {
            debug!("No usable previous weights - path={}, reason={:#}", path.display(), e);
            HashMap::new()
        }
    }
}

fn read_previous(path: &Path) -> Result<HashMap<String, i64>> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let pairs: Vec<(String, i64)> =
        serde_json::from_slice(&bytes).with_context(|| format!("decode {}", path.display()))?;
    // later duplicates overwrite earlier ones
    Ok(pairs.into_iter().collect())
}

/// New words carry their weight, changed words carry `current - previous`.
/// Unchanged and removed words are left out.
pub fn compare(current: &WeightMap, previous: &HashMap<String, i64>) -> DiffMap {
    let entries = current
        .iter()
        .filter_map(|(word, weight)| {
            let weight = i64::from(weight);
            match previous.get(word) {
                None => Some((word.to_string(), weight)),
                Some(&prev) if prev != weight => Some((word.to_string(), weight - prev)),
                Some(_) => None,
            }
        })
        .collect();
    DiffMap { entries }
}
