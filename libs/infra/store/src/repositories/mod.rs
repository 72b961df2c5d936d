// [libs/infra/store/src/repositories/mod.rs]
/*!
 * APARATO: REPOSITORY REGISTRY
 * RESPONSABILIDAD: AGRUPAR LOS REPOSITORIOS POR AGREGADO
 */

pub mod confirmation;
pub mod job;
pub mod learned_pattern;
pub mod llm_cache;
