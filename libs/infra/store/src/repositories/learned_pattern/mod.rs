// [libs/infra/store/src/repositories/learned_pattern/mod.rs]
/*!
 * =================================================================
 * APARATO: LEARNED PATTERN REPOSITORY (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA COALESCENTE Y CANDIDATOS PARA EL RESOLVEDOR L3
 *
 * Fetches are narrowed to exactly the rows the pure resolver in
 * `leadscout-domain-learning` needs for its lookup-order tiers (spec §4.4):
 * the `UNIQUE(pattern_kind, pattern_value, target_category)` schema
 * constraint does the coalescing, this repository never writes a duplicate.
 * =================================================================
 */

pub mod queries;

use libsql::{params, Connection};
use std::str::FromStr;
use tracing::instrument;
use uuid::Uuid;

use leadscout_core_phonetic::PhoneticCodes;
use leadscout_domain_cascade::ports::{LearnedOutcome, LearnedPatternLookup};
use leadscout_domain_learning::{extract_linguistic_markers, phonetic_family_key, resolve_against_candidates, LearningSink, LearningSinkError};
use leadscout_domain_models::{CanonicalCategory, LearnedPattern, LlmClassification, PatternKind};

use crate::errors::StoreError;
use self::queries as sql;

pub struct LearnedPatternRepository {
    connection: Connection,
}

impl LearnedPatternRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self))]
    pub async fn upsert(&self, pattern: &LearnedPattern) -> Result<(), StoreError> {
        self.connection
            .execute(
                sql::UPSERT_PATTERN,
                params![
                    pattern.id.to_string(),
                    pattern.pattern_kind.code(),
                    pattern.pattern_value.clone(),
                    pattern.target_category.code(),
                    pattern.derived_confidence,
                    pattern.originating_session_id.to_string(),
                    pattern.created_at.to_rfc3339(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn fetch_by_kind_value(&self, kind: PatternKind, value: &str) -> Result<Vec<LearnedPattern>, StoreError> {
        let mut rows = self.connection.query(sql::FETCH_CANDIDATES_BY_KIND_VALUE, params![kind.code(), value]).await?;
        let mut patterns = Vec::new();
        while let Some(row) = rows.next().await? {
            patterns.push(map_row_to_pattern(&row)?);
        }
        Ok(patterns)
    }

    /// Gathers exactly the candidate rows the resolver's lookup-order tiers
    /// (spec §4.4) might match against, across every `PatternKind`.
    pub async fn fetch_candidates(&self, normalized_name: &str, codes: &PhoneticCodes) -> Result<Vec<LearnedPattern>, StoreError> {
        let mut candidates = Vec::new();

        for kind in [PatternKind::Prefix, PatternKind::Suffix, PatternKind::PhoneticCodeFamily, PatternKind::StructuralFeature, PatternKind::Contains] {
            candidates.extend(self.fetch_by_kind_value(kind, normalized_name).await?);
        }

        candidates.extend(self.fetch_by_kind_value(PatternKind::PhoneticCodeFamily, &phonetic_family_key(codes)).await?);

        for length in [2usize, 3] {
            if normalized_name.len() >= length {
                candidates.extend(self.fetch_by_kind_value(PatternKind::Prefix, &normalized_name[..length]).await?);
                candidates.extend(self.fetch_by_kind_value(PatternKind::Suffix, &normalized_name[normalized_name.len() - length..]).await?);
            }
        }

        for marker in extract_linguistic_markers(normalized_name) {
            candidates.extend(self.fetch_by_kind_value(PatternKind::StructuralFeature, &marker).await?);
        }

        candidates.sort_by_key(|pattern| pattern.id);
        candidates.dedup_by_key(|pattern| pattern.id);
        Ok(candidates)
    }

    pub async fn marker_cooccurrence(&self, marker: &str, category: CanonicalCategory) -> Result<f64, StoreError> {
        let mut rows = self.connection.query(sql::MARKER_COOCCURRENCE, params![marker, category.code()]).await?;
        match rows.next().await? {
            Some(row) => {
                let matching: i64 = row.get(0)?;
                let total: i64 = row.get(1)?;
                Ok(if total == 0 { 0.0 } else { matching as f64 / total as f64 })
            }
            None => Ok(0.0),
        }
    }

    pub async fn record_confirmation(&self, pattern_id: Uuid) -> Result<(), StoreError> {
        self.connection.execute(sql::RECORD_CONFIRMATION, params![pattern_id.to_string()]).await?;
        Ok(())
    }
}

fn map_row_to_pattern(row: &libsql::Row) -> Result<LearnedPattern, StoreError> {
    let id: String = row.get(0)?;
    let pattern_kind: String = row.get(1)?;
    let pattern_value: String = row.get(2)?;
    let target_category: String = row.get(3)?;
    let derived_confidence: f64 = row.get(4)?;
    let usage_count: i64 = row.get(5)?;
    let success_count: i64 = row.get(6)?;
    let originating_session_id: String = row.get(7)?;
    let active: i64 = row.get(8)?;
    let created_at: String = row.get(9)?;

    Ok(LearnedPattern {
        id: Uuid::parse_str(&id).map_err(|error| StoreError::MappingError(error.to_string()))?,
        pattern_kind: parse_pattern_kind(&pattern_kind)?,
        pattern_value,
        target_category: CanonicalCategory::from_str(&target_category).map_err(|error| StoreError::MappingError(error.to_string()))?,
        derived_confidence,
        usage_count: usage_count as u64,
        success_count: success_count as u64,
        originating_session_id: Uuid::parse_str(&originating_session_id).map_err(|error| StoreError::MappingError(error.to_string()))?,
        active: active != 0,
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|error| StoreError::MappingError(error.to_string()))?,
    })
}

fn parse_pattern_kind(value: &str) -> Result<PatternKind, StoreError> {
    match value {
        "prefix" => Ok(PatternKind::Prefix),
        "suffix" => Ok(PatternKind::Suffix),
        "contains" => Ok(PatternKind::Contains),
        "phonetic-code-family" => Ok(PatternKind::PhoneticCodeFamily),
        "structural-feature" => Ok(PatternKind::StructuralFeature),
        other => Err(StoreError::MappingError(format!("unknown pattern kind '{other}'"))),
    }
}

/// Adapter implementing the cascade's L3 read port over this repository.
pub struct LearnedPatternLookupAdapter {
    repository: LearnedPatternRepository,
}

impl LearnedPatternLookupAdapter {
    pub fn new(repository: LearnedPatternRepository) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl LearnedPatternLookup for LearnedPatternLookupAdapter {
    async fn lookup_learned(&self, normalized_name: &str, codes: &PhoneticCodes) -> Option<LearnedOutcome> {
        let candidates = match self.repository.fetch_candidates(normalized_name, codes).await {
            Ok(candidates) => candidates,
            Err(error) => {
                tracing::warn!("L3 candidate fetch failed for '{}': {}", normalized_name, error);
                return None;
            }
        };
        resolve_against_candidates(normalized_name, codes, &candidates)
    }
}

/// Adapter implementing the Learning Extractor's write port (C8) over the
/// LLM cache and learned-pattern repositories together.
pub struct LearningSinkAdapter {
    classifications: crate::repositories::llm_cache::LlmCacheRepository,
    patterns: LearnedPatternRepository,
}

impl LearningSinkAdapter {
    pub fn new(classifications: crate::repositories::llm_cache::LlmCacheRepository, patterns: LearnedPatternRepository) -> Self {
        Self { classifications, patterns }
    }
}

#[async_trait::async_trait]
impl LearningSink for LearningSinkAdapter {
    async fn upsert_classification(&self, classification: &LlmClassification) -> Result<(), LearningSinkError> {
        self.classifications.upsert(classification).await.map_err(|error| LearningSinkError(error.to_string()))
    }

    async fn upsert_pattern(&self, pattern: &LearnedPattern) -> Result<(), LearningSinkError> {
        self.patterns.upsert(pattern).await.map_err(|error| LearningSinkError(error.to_string()))
    }

    async fn marker_cooccurrence(&self, marker: &str, category: CanonicalCategory) -> f64 {
        self.patterns.marker_cooccurrence(marker, category).await.unwrap_or(0.0)
    }
}

