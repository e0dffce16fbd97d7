use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::PageSourceConfig;
use crate::text::clean_text;

static EMBEDDED_TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""title":"([^"]+)""#).unwrap());
static META_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").unwrap());

/// Anything that can produce cleaned titles. Failures are logged, never returned.
#[allow(async_fn_in_trait)]
pub trait TitleSource {
    fn name(&self) -> &str;
    async fn fetch_titles(&self) -> Vec<String>;
}

/// Fetches a fixed list of pages and reads one title from each.
pub struct PageListSource {
    client: Client,
    cfg: PageSourceConfig,
    headers: HeaderMap,
}

impl PageListSource {
    pub fn new(client: Client, cfg: PageSourceConfig) -> Self {
        let mut headers = HeaderMap::new();
        for (k, v) in &cfg.headers {
            match (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_str(v)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Skipping invalid header - source={}, header={}", cfg.name, k),
            }
        }
        Self { client, cfg, headers }
    }

    async fn fetch_one(&self, url: &str) -> Result<Option<String>> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL {}", url))?;

        let mut req = self.client.get(parsed).headers(self.headers.clone());
        if let Some(secs) = self.cfg.timeout_secs {
            req = req.timeout(Duration::from_secs(secs));
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Request failed for {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            debug!("Non-success status, parsing body anyway - url={}, status={}", url, status);
        }

        let body = resp
            .text()
            .await
            .with_context(|| format!("Reading body for {}", url))?;

        Ok(extract_title(&body, &self.cfg.meta_name, self.cfg.json_fallback))
    }
}

impl TitleSource for PageListSource {
    fn name(&self) -> &str {
        &self.cfg.name
    }

    async fn fetch_titles(&self) -> Vec<String> {
        let start = Instant::now();
        let mut titles: Vec<String> = Vec::new();

        for url in &self.cfg.urls {
            match self.fetch_one(url).await {
                Ok(Some(title)) if title.is_empty() => {
                    debug!("Title empty after cleaning - url={}", url);
                }
                Ok(Some(title)) => {
                    if self.cfg.dedupe && titles.contains(&title) {
                        debug!("Duplicate title skipped - source={}, title={}", self.cfg.name, title);
                        continue;
                    }
                    titles.push(title);
                }
                Ok(None) => {
                    debug!("No title found - source={}, url={}", self.cfg.name, url);
                }
                Err(e) => {
                    warn!("Error fetching {} title for {}: {:#}", self.cfg.name, url, e);
                }
            }
        }

        info!(
            "{} fetch completed - duration={:.2}s, titles={}",
            self.cfg.name,
            start.elapsed().as_secs_f32(),
            titles.len()
        );
        debug!("{} titles: {:?}", self.cfg.name, titles);
        titles
    }
}

/// Title from `<meta name=... content=...>`, else from an embedded `"title":"..."`
/// when `json_fallback` is set. Only the first matching meta tag is considered.
pub fn extract_title(body: &str, meta_name: &str, json_fallback: bool) -> Option<String> {
    if let Some(content) = meta_content(body, meta_name).filter(|c| !c.is_empty()) {
        return Some(clean_text(&content));
    }
    if json_fallback {
        return embedded_json_title(body).map(|t| clean_text(&t));
    }
    None
}

fn meta_content(body: &str, meta_name: &str) -> Option<String> {
    let doc = Html::parse_document(body);
    let el = doc
        .select(&META_SEL)
        .find(|el| el.value().attr("name") == Some(meta_name))?;
    el.value().attr("content").map(str::to_string)
}

fn embedded_json_title(body: &str) -> Option<String> {
    EMBEDDED_TITLE_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Titles pre-scraped into a local file. The live site is never contacted.
pub struct LocalCacheSource {
    name: String,
    path: PathBuf,
}

impl LocalCacheSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

impl TitleSource for LocalCacheSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_titles(&self) -> Vec<String> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "{} title cache not found at {}; live fetch is not supported, skipping",
                    self.name,
                    self.path.display()
                );
                return Vec::new();
            }
            Err(e) => {
                warn!("Could not read {} title cache {}: {}", self.name, self.path.display(), e);
                return Vec::new();
            }
        };

        // a stray non-UTF-8 byte only spoils its own line
        let titles: Vec<String> = String::from_utf8_lossy(&raw)
            .lines()
            .map(clean_text)
            .filter(|t| !t.is_empty())
            .collect();
        info!(
            "{} titles loaded from local file - path={}, titles={}",
            self.name,
            self.path.display(),
            titles.len()
        );
        titles
    }
}
