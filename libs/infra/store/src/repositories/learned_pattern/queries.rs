// [libs/infra/store/src/repositories/learned_pattern/queries.rs]
/*!
 * APARATO: LEARNED PATTERN SQL REGISTRY
 * RESPONSABILIDAD: PERSISTENCIA COALESCENTE Y CANDIDATOS PARA L3
 */

pub const UPSERT_PATTERN: &str = r#"
    INSERT INTO learned_patterns (
        id, pattern_kind, pattern_value, target_category, derived_confidence,
        usage_count, success_count, originating_session_id, active, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, 1, 0, ?6, 1, ?7)
    ON CONFLICT(pattern_kind, pattern_value, target_category) DO UPDATE SET
        usage_count = usage_count + 1,
        derived_confidence = ?5
"#;

pub const FETCH_CANDIDATES_BY_KIND_VALUE: &str = r#"
    SELECT id, pattern_kind, pattern_value, target_category, derived_confidence,
           usage_count, success_count, originating_session_id, active, created_at
    FROM learned_patterns
    WHERE active = 1 AND pattern_kind = ?1 AND pattern_value = ?2
"#;

pub const FETCH_ALL_ACTIVE: &str = r#"
    SELECT id, pattern_kind, pattern_value, target_category, derived_confidence,
           usage_count, success_count, originating_session_id, active, created_at
    FROM learned_patterns WHERE active = 1
"#;

pub const MARKER_COOCCURRENCE: &str = r#"
    SELECT
        COALESCE(SUM(CASE WHEN target_category = ?2 THEN usage_count ELSE 0 END), 0) AS matching,
        COALESCE(SUM(usage_count), 0) AS total
    FROM learned_patterns
    WHERE active = 1 AND pattern_kind = 'structural-feature' AND pattern_value = ?1
"#;

pub const RECORD_CONFIRMATION: &str = r#"
    UPDATE learned_patterns SET success_count = success_count + 1 WHERE id = ?1
"#;
