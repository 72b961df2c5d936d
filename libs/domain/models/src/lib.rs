// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS (V1.0 - CASCADE GROUND ZERO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATOS SOBERANOS COMPARTIDOS POR TODO EL CASCADE
 *
 * Entidades puras de dominio (spec §3): Job, LeadResult, JobLock,
 * LlmClassification, LearnedPattern, PhoneticFamily, Confirmation y
 * CanonicalCategory. Sin dependencias de infraestructura (ni libsql, ni
 * reqwest): cualquier crate de la cascada puede depender de este módulo sin
 * arrastrar un motor de persistencia o un cliente de red.
 * =================================================================
 */

pub mod canonical_category;
pub mod confirmation;
pub mod job;
pub mod job_lock;
pub mod lead_result;
pub mod learned_pattern;
pub mod llm_classification;
pub mod phonetic_family;

pub use canonical_category::{CanonicalCategory, InvalidCategoryError};
pub use confirmation::{spatial_context_hash, Confirmation};
pub use job::{Job, JobStatus, SourceFingerprint};
pub use job_lock::JobLock;
pub use lead_result::{ClassificationMethod, LeadResult, LeadSourceFields};
pub use learned_pattern::{LearnedPattern, PatternKind};
pub use llm_classification::{LinguisticMarkers, LlmClassification, ProviderId, StructuralFeatures};
pub use phonetic_family::PhoneticFamily;
