//! The drug search pipeline: cache, label lookup, best match, generic-name
//! fallback, summarization, cache write.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{matching, resolution, summarize};
use crate::clients::{LabelSource, ReasoningService};
use crate::constants::limits::MAX_QUERY_LEN;
use crate::db::Store;
use crate::models::drug::DrugSummary;
use crate::models::label::{LabelQuery, LabelRecord};

#[derive(Debug, Error)]
pub enum DrugSearchError {
    #[error("Search term required")]
    EmptyQuery,

    #[error("Search term is too long (max {} characters)", MAX_QUERY_LEN)]
    QueryTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    CacheHit(DrugSummary),
    Resolved(DrugSummary),
    NotFound,
}

impl SearchOutcome {
    #[must_use]
    pub fn into_summary(self) -> Option<DrugSummary> {
        match self {
            Self::CacheHit(s) | Self::Resolved(s) => Some(s),
            Self::NotFound => None,
        }
    }
}

/// Trimmed, lower-cased query used as the cache key.
pub fn normalize_query(raw: &str) -> Result<String, DrugSearchError> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        return Err(DrugSearchError::EmptyQuery);
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(DrugSearchError::QueryTooLong);
    }
    Ok(query)
}

pub struct DrugSearchService {
    store: Store,
    labels: Arc<dyn LabelSource>,
    reasoning: Arc<dyn ReasoningService>,
    cache_ttl: chrono::Duration,
    max_label_chars: usize,
}

impl DrugSearchService {
    #[must_use]
    pub fn new(
        store: Store,
        labels: Arc<dyn LabelSource>,
        reasoning: Arc<dyn ReasoningService>,
        cache_ttl: chrono::Duration,
        max_label_chars: usize,
    ) -> Self {
        Self {
            store,
            labels,
            reasoning,
            cache_ttl,
            max_label_chars,
        }
    }

    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome, DrugSearchError> {
        let query = normalize_query(raw_query)?;

        match self.store.get_cached_summary(&query).await {
            Ok(Some(summary)) => {
                info!(stage = "cache_hit", query = %query, "Serving cached summary");
                metrics::counter!("drug_search_cache_hits_total").increment(1);
                return Ok(SearchOutcome::CacheHit(summary));
            }
            Ok(None) => {}
            Err(e) => warn!(stage = "cache_lookup", query = %query, error = %e, "Cache read failed"),
        }
        metrics::counter!("drug_search_cache_misses_total").increment(1);

        let Some((label, resolved_generic)) = self.resolve_label(&query).await else {
            info!(stage = "not_found", query = %query, "No label matched the query");
            metrics::counter!("drug_search_not_found_total").increment(1);
            return Ok(SearchOutcome::NotFound);
        };

        let name = summarize::display_name(resolved_generic.as_deref(), &label);
        info!(stage = "summarizing", query = %query, drug = %name, "Summarizing label");

        let ai = summarize::summarize(
            self.reasoning.as_ref(),
            &name,
            &label.raw_fields(),
            self.max_label_chars,
        )
        .await;
        if ai.is_none() {
            metrics::counter!("drug_search_summary_fallback_total").increment(1);
        }

        let summary = summarize::compose(&name, &label, ai);

        if let Err(e) = self
            .store
            .cache_summary(&query, &summary, self.cache_ttl)
            .await
        {
            warn!(stage = "cache_write", query = %query, error = %e, "Failed to cache summary");
        } else {
            info!(stage = "cached", query = %query, source = %summary.source, "Summary cached");
        }

        Ok(SearchOutcome::Resolved(summary))
    }

    /// Finds the best label for the query, translating brand to generic when
    /// the direct lookup has no acceptable candidate.
    async fn resolve_label(&self, query: &str) -> Option<(LabelRecord, Option<String>)> {
        let candidates = self
            .lookup(&LabelQuery::ByName(query.to_string()))
            .await
            .unwrap_or_default();
        debug!(stage = "searching", query, candidates = candidates.len(), "Name lookup finished");

        if let Some(best) = matching::select_best(query, &candidates) {
            info!(stage = "selected", query, "Direct label match selected");
            return Some((best.clone(), None));
        }

        info!(stage = "translating", query, "No direct match, resolving generic name");
        let generic = resolution::resolve_generic(self.reasoning.as_ref(), query).await?;
        info!(stage = "translating", query, generic = %generic, "Resolved generic name");

        let candidates = self.lookup_generic(&generic).await;
        debug!(stage = "searching", generic = %generic, candidates = candidates.len(), "Generic lookup finished");

        matching::select_best(&generic, &candidates).map(|best| (best.clone(), Some(generic.clone())))
    }

    /// Generic lookup. A multi-word generic with no results, or whose lookup
    /// failed, is retried once with its first word.
    async fn lookup_generic(&self, generic: &str) -> Vec<LabelRecord> {
        let found = self
            .lookup(&LabelQuery::ByGeneric(generic.to_string()))
            .await
            .unwrap_or_default();
        if !found.is_empty() {
            return found;
        }

        let mut words = generic.split_whitespace();
        match (words.next(), words.next()) {
            (Some(first), Some(_)) => {
                info!(stage = "searching", generic, partial = first, "Retrying with partial generic name");
                self.lookup(&LabelQuery::ByGeneric(first.to_string()))
                    .await
                    .unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    /// `None` when the label source failed.
    async fn lookup(&self, query: &LabelQuery) -> Option<Vec<LabelRecord>> {
        match self.labels.search_labels(query).await {
            Ok(found) => Some(found),
            Err(e) => {
                warn!(term = query.term(), error = %e, "Label lookup failed");
                None
            }
        }
    }
}
