// [libs/infra/store/src/repositories/llm_cache/queries.rs]
/*!
 * APARATO: LLM CLASSIFICATION CACHE SQL REGISTRY
 * RESPONSABILIDAD: SENTENCIAS DE CACHÉ DE NIVEL 0 Y MATERIAL CRUDO DE APRENDIZAJE
 */

pub const UPSERT_CLASSIFICATION: &str = r#"
    INSERT INTO llm_classifications (
        normalized_name, category, confidence, provider, cost, processing_time_ms,
        phonetic_codes_json, linguistic_markers_json, structural_features_json,
        originating_session_id, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    ON CONFLICT(normalized_name) DO UPDATE SET
        category = excluded.category,
        confidence = excluded.confidence,
        provider = excluded.provider,
        cost = excluded.cost,
        processing_time_ms = excluded.processing_time_ms,
        phonetic_codes_json = excluded.phonetic_codes_json,
        linguistic_markers_json = excluded.linguistic_markers_json,
        structural_features_json = excluded.structural_features_json,
        originating_session_id = excluded.originating_session_id,
        created_at = excluded.created_at
"#;

pub const GET_BY_NORMALIZED_NAME: &str = r#"
    SELECT normalized_name, category, confidence, provider, cost, processing_time_ms,
           phonetic_codes_json, linguistic_markers_json, structural_features_json,
           originating_session_id, created_at
    FROM llm_classifications WHERE normalized_name = ?1
"#;
