use chrono::{DateTime, Utc};
use serde::Serialize;

/// Session listing entry, as returned by `GET /api/sessions`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub updated_at: DateTime<Utc>,
}
