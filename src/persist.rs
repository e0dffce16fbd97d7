// src/persist.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};
use tracing::debug;

use crate::models::{DiffMap, WeightMap};

/// Overwrite `path` with the current weights.
pub fn write_weights(path: &Path, weights: &WeightMap) -> Result<()> {
    write_json(path, weights)?;
    debug!("Wrote {} ({} words)", path.display(), weights.len());
    Ok(())
}

/// Write the diff only when it has entries. Returns whether the file was written.
pub fn write_diff(path: &Path, diff: &DiffMap) -> Result<bool> {
    if diff.is_empty() {
        return Ok(false);
    }
    write_json(path, diff)?;
    debug!("Wrote {} ({} words)", path.display(), diff.len());
    Ok(true)
}

fn write_json<T: ?Sized + Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{compare, load_previous};

    fn wm(pairs: &[(&str, u32)]) -> WeightMap {
        pairs.iter().map(|(w, v)| (w.to_string(), *v)).collect()
    }

    #[test]
    fn weights_written_as_pretty_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("wordcloud_data.json");
        write_weights(&p, &wm(&[("Network", 50), ("Patent", 25)])).unwrap();
        let body = fs::read_to_string(&p).unwrap();
        assert_eq!(
            body,
            "[\n  [\n    \"Network\",\n    50\n  ],\n  [\n    \"Patent\",\n    25\n  ]\n]"
        );
    }

    #[test]
    fn empty_diff_leaves_existing_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("wordcloud_diff.json");
        fs::write(&p, "[[\"Old\", 7]]").unwrap();
        assert!(!write_diff(&p, &DiffMap::default()).unwrap());
        assert_eq!(fs::read_to_string(&p).unwrap(), "[[\"Old\", 7]]");
    }

    #[test]
    fn empty_diff_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("wordcloud_diff.json");
        assert!(!write_diff(&p, &DiffMap::default()).unwrap());
        assert!(!p.exists());
    }

    #[test]
    fn creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out").join("nested").join("data.json");
        write_weights(&p, &wm(&[("Alpha", 50)])).unwrap();
        assert!(p.exists());
    }

    #[test]
    fn reload_after_identical_run_gives_empty_diff() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("wordcloud_data.json");
        let current = wm(&[("Network", 50), ("System", 50), ("Patent", 25)]);

        let first = compare(&current, &load_previous(&p));
        assert_eq!(first.len(), 3);
        write_weights(&p, &current).unwrap();

        let second = compare(&current, &load_previous(&p));
        assert!(second.is_empty());
    }
}
