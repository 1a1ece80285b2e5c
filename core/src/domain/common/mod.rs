use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::query::value_objects::QueryLimits;

pub mod entities;
pub mod services;

#[derive(Clone, Debug, Default)]
pub struct FamConfig {
    pub query: QueryLimits,
    pub seed: SeedConfig,
}

#[derive(Clone, Debug, Default)]
pub struct SeedConfig {
    /// JSON file with `companies`, `departments` and `locations` arrays.
    pub file: Option<PathBuf>,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
