// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::keywords::{DEFAULT_MIN_WORD_LEN, DEFAULT_STOP_WORDS};
use crate::weights::{WeightParams, DEFAULT_MAX_KEYWORDS, DEFAULT_MAX_WEIGHT};

pub const CONFIG_ENV: &str = "TITLE_CLOUD_CONFIG";

const PATENT_URLS: &[&str] = &[
    "https://patents.google.com/patent/US11971805B2/en",
    "https://patents.google.com/patent/US20230269268A1/en",
    "https://patents.google.com/patent/US20200409681A1/en",
    "https://patents.google.com/patent/US20190333075A1/en",
    "https://patents.google.com/patent/US11443026B2/en",
    "https://patents.google.com/patent/US8626888B2/en",
    "https://patents.google.com/patent/US10887414B2/en",
    "https://patents.google.com/patent/US10834219B1/en",
    "https://patents.google.com/patent/US10460031B2/en",
    "https://patents.google.com/patent/US10079719B2/en",
    "https://patents.google.com/patent/US8626888B2/en",
];

const IEEE_URLS: &[&str] = &[
    "https://ieeexplore.ieee.org/document/11187640",
    "https://link.springer.com/chapter/10.1007/978-981-97-4540-1_3",
    "https://ieeexplore.ieee.org/document/10624986",
    "https://ieeexplore.ieee.org/document/10426170",
    "https://ieeexplore.ieee.org/document/9955300",
];

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// One list of pages sharing the same title lookup rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSourceConfig {
    pub name: String,
    pub urls: Vec<String>,
    /// `<meta name="...">` whose `content` holds the title.
    pub meta_name: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_secs: Option<u64>,
    /// Search the raw body for `"title":"..."` when the meta tag is missing.
    pub json_fallback: bool,
    pub dedupe: bool,
}

impl Default for PageSourceConfig {
    fn default() -> Self {
        Self {
            name: "pages".to_string(),
            urls: Vec::new(),
            meta_name: "citation_title".to_string(),
            headers: BTreeMap::new(),
            timeout_secs: None,
            json_fallback: false,
            dedupe: false,
        }
    }
}

impl PageSourceConfig {
    pub fn patents() -> Self {
        Self {
            name: "Patents".to_string(),
            urls: PATENT_URLS.iter().map(|s| s.to_string()).collect(),
            meta_name: "DC.title".to_string(),
            ..Self::default()
        }
    }

    pub fn ieee() -> Self {
        let headers = [
            ("User-Agent", USER_AGENT),
            ("Accept-Language", ACCEPT_LANGUAGE),
            ("Referer", "https://ieeexplore.ieee.org/"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            name: "IEEE".to_string(),
            urls: IEEE_URLS.iter().map(|s| s.to_string()).collect(),
            meta_name: "citation_title".to_string(),
            headers,
            timeout_secs: Some(10),
            json_fallback: true,
            dedupe: true,
        }
    }

    /// URLs listed more than once, each reported once, in list order.
    pub fn duplicate_urls(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.urls
            .iter()
            .filter(|u| !seen.insert(u.as_str()) && reported.insert(u.as_str()))
            .map(|u| u.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub ieee: PageSourceConfig,
    pub patents: PageSourceConfig,
    /// Pre-scraped DZone titles, one per line.
    pub cache_file: PathBuf,
    pub output_file: PathBuf,
    pub diff_file: PathBuf,
    pub max_keywords: usize,
    pub max_weight: u32,
    pub min_word_len: usize,
    pub stop_words: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ieee: PageSourceConfig::ieee(),
            patents: PageSourceConfig::patents(),
            cache_file: PathBuf::from("dzone_titles.txt"),
            output_file: PathBuf::from("wordcloud_data.json"),
            diff_file: PathBuf::from("wordcloud_diff.json"),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_weight: DEFAULT_MAX_WEIGHT,
            min_word_len: DEFAULT_MIN_WORD_LEN,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn weight_params(&self) -> WeightParams {
        WeightParams {
            max_keywords: self.max_keywords,
            max_weight: self.max_weight,
        }
    }

    /// Resolve relative output paths against `dir`.
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.output_file = dir.join(&self.output_file);
        self.diff_file = dir.join(&self.diff_file);
        self
    }
}

/// A page source block as written in the config file. Keys left out keep the
/// value of the preset the block is applied to.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PageSourceFile {
    name: Option<String>,
    urls: Option<Vec<String>>,
    meta_name: Option<String>,
    headers: Option<BTreeMap<String, String>>,
    /// 0 disables the timeout.
    timeout_secs: Option<u64>,
    json_fallback: Option<bool>,
    dedupe: Option<bool>,
}

impl PageSourceFile {
    fn apply(self, mut base: PageSourceConfig) -> PageSourceConfig {
        if let Some(v) = self.name {
            base.name = v;
        }
        if let Some(v) = self.urls {
            base.urls = v;
        }
        if let Some(v) = self.meta_name {
            base.meta_name = v;
        }
        if let Some(v) = self.headers {
            base.headers = v;
        }
        if let Some(v) = self.timeout_secs {
            base.timeout_secs = (v > 0).then_some(v);
        }
        if let Some(v) = self.json_fallback {
            base.json_fallback = v;
        }
        if let Some(v) = self.dedupe {
            base.dedupe = v;
        }
        base
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    ieee: Option<PageSourceFile>,
    patents: Option<PageSourceFile>,
    cache_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    diff_file: Option<PathBuf>,
    max_keywords: Option<usize>,
    max_weight: Option<u32>,
    min_word_len: Option<usize>,
    stop_words: Option<Vec<String>>,
}

impl ConfigFile {
    fn into_config(self) -> AppConfig {
        let mut cfg = AppConfig::default();
        if let Some(b) = self.ieee {
            cfg.ieee = b.apply(cfg.ieee);
        }
        if let Some(b) = self.patents {
            cfg.patents = b.apply(cfg.patents);
        }
        if let Some(v) = self.cache_file {
            cfg.cache_file = v;
        }
        if let Some(v) = self.output_file {
            cfg.output_file = v;
        }
        if let Some(v) = self.diff_file {
            cfg.diff_file = v;
        }
        if let Some(v) = self.max_keywords {
            cfg.max_keywords = v;
        }
        if let Some(v) = self.max_weight {
            cfg.max_weight = v;
        }
        if let Some(v) = self.min_word_len {
            cfg.min_word_len = v;
        }
        if let Some(v) = self.stop_words {
            cfg.stop_words = v;
        }
        cfg
    }
}

/// Load a YAML config; keys left out keep their built-in values.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("parse config {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<AppConfig> {
    if raw.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let file: ConfigFile = serde_yaml::from_str(raw)?;
    Ok(file.into_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_built_in_lists() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.patents.urls.len(), 11);
        assert_eq!(cfg.patents.meta_name, "DC.title");
        assert!(!cfg.patents.dedupe);
        assert_eq!(cfg.patents.timeout_secs, None);

        assert_eq!(cfg.ieee.urls.len(), 5);
        assert_eq!(cfg.ieee.timeout_secs, Some(10));
        assert!(cfg.ieee.json_fallback && cfg.ieee.dedupe);
        assert_eq!(
            cfg.ieee.headers.get("Referer").map(String::as_str),
            Some("https://ieeexplore.ieee.org/")
        );

        assert_eq!(cfg.stop_words.len(), 12);
        assert_eq!(cfg.max_keywords, 50);
    }

    #[test]
    fn default_patent_list_has_one_duplicate() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.patents.duplicate_urls(),
            vec!["https://patents.google.com/patent/US8626888B2/en"]
        );
        assert!(cfg.ieee.duplicate_urls().is_empty());
    }

    #[test]
    fn partial_source_block_keeps_its_preset() {
        let cfg = parse_config(
            r#"
max_keywords: 20
patents:
  urls:
    - "https://example.com/p/1"
ieee:
  timeout_secs: 3
"#,
        )
        .unwrap();
        assert_eq!(cfg.max_keywords, 20);
        assert_eq!(
            cfg.patents,
            PageSourceConfig {
                urls: vec!["https://example.com/p/1".to_string()],
                ..PageSourceConfig::patents()
            }
        );
        assert_eq!(cfg.patents.meta_name, "DC.title");
        assert_eq!(cfg.patents.name, "Patents");
        assert_eq!(
            cfg.ieee,
            PageSourceConfig { timeout_secs: Some(3), ..PageSourceConfig::ieee() }
        );
        assert_eq!(cfg.output_file, PathBuf::from("wordcloud_data.json"));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = parse_config("ieee:\n  timeout_secs: 0\n").unwrap();
        assert_eq!(cfg.ieee.timeout_secs, None);
        assert!(cfg.ieee.dedupe);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("patents:\n  meta: DC.title\n").is_err());
        assert!(parse_config("max_keyword: 3\n").is_err());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(parse_config("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(parse_config("max_keywords: [not, a, number]").is_err());
    }

    #[test]
    fn output_dir_prefixes_relative_paths() {
        let cfg = AppConfig::default().with_output_dir(Path::new("out"));
        assert_eq!(cfg.output_file, Path::new("out").join("wordcloud_data.json"));
        assert_eq!(cfg.diff_file, Path::new("out").join("wordcloud_diff.json"));
    }
}
