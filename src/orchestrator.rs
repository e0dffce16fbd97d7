use anyhow::Result;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::diff::{compare, load_previous};
use crate::fetch::{LocalCacheSource, PageListSource, TitleSource};
use crate::keywords::{KeywordExtractor, StopWords};
use crate::models::{DiffMap, WeightMap};
use crate::persist::{write_diff, write_weights};
use crate::weights::{normalize, top_keywords};

/// What a run produced, for callers that want more than the files.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub titles: usize,
    pub weights: WeightMap,
    pub diff: DiffMap,
    pub diff_written: bool,
}

async fn gather<S: TitleSource>(source: &S, all: &mut Vec<String>) {
    let titles = source.fetch_titles().await;
    debug!("Source finished - source={}, titles={}", source.name(), titles.len());
    all.extend(titles);
}

/// Titles from every source, in IEEE, patent, local cache order. Page sources
/// are skipped when there is no client.
async fn collect_titles(cfg: &AppConfig, client: Option<Client>) -> Vec<String> {
    let mut titles = Vec::new();
    if let Some(client) = client {
        let ieee = PageListSource::new(client.clone(), cfg.ieee.clone());
        let patents = PageListSource::new(client, cfg.patents.clone());
        gather(&ieee, &mut titles).await;
        gather(&patents, &mut titles).await;
    }
    let cache = LocalCacheSource::new("DZone", cfg.cache_file.clone());
    gather(&cache, &mut titles).await;
    titles
}

pub async fn run_pipeline(cfg: &AppConfig) -> Result<RunSummary> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - ieee_urls={}, patent_urls={}, cache={}",
        cfg.ieee.urls.len(),
        cfg.patents.urls.len(),
        cfg.cache_file.display()
    );

    for source in [&cfg.ieee, &cfg.patents] {
        let dups = source.duplicate_urls();
        if !dups.is_empty() {
            warn!(
                "{} URL list has duplicates that will be counted twice: {:?}",
                source.name, dups
            );
        }
    }

    let client = match Client::builder().build() {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("HTTP client unavailable, reading only the local cache: {:#}", e);
            None
        }
    };

    // 1) titles: IEEE list, then patents, then the local cache
    let titles = collect_titles(cfg, client).await;

    if titles.is_empty() {
        warn!("No titles gathered from any source; output will be empty");
    }

    // 2) keywords
    let extractor = KeywordExtractor::new(StopWords::new(&cfg.stop_words), cfg.min_word_len);
    let counts = extractor.extract(&titles);
    debug!("Keyword extraction - titles={}, distinct_words={}", titles.len(), counts.len());

    // 3) weights
    let params = cfg.weight_params();
    let weights = normalize(&counts, params);

    // 4) diff against the last persisted run
    let previous = load_previous(&cfg.output_file);
    let diff = compare(&weights, &previous);

    // 5) persist
    let combined = weights.clone().truncated(params.max_keywords);
    write_weights(&cfg.output_file, &combined)?;

    let diff_written = write_diff(&cfg.diff_file, &diff)?;
    if diff_written {
        info!("{} new/changed words saved to {}", diff.len(), cfg.diff_file.display());
    } else {
        info!("No new words detected");
    }
    info!("Wordcloud data updated - path={}, words={}", cfg.output_file.display(), combined.len());

    let preview: Vec<(String, u32)> = top_keywords(&counts, 10);
    info!("Top 10 keywords: {:?}", preview);

    info!(
        "Pipeline completed - total_duration={:.2}s, titles={}",
        pipeline_start.elapsed().as_secs_f32(),
        titles.len()
    );

    Ok(RunSummary {
        titles: titles.len(),
        weights: combined,
        diff,
        diff_written,
    })
}
