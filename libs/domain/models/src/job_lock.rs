// [libs/domain/models/src/job_lock.rs]
/*!
 * APARATO: JOB LOCK DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: EXCLUSIÓN MUTUA POR RUTA DE ORIGEN
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobLock {
    pub input_source_path: String,
    pub job_id: Uuid,
    pub holder_identifier: String,
    pub acquired_at: DateTime<Utc>,
}
