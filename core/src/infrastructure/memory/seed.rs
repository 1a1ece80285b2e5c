use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    company::entities::Company, department::entities::Department, location::entities::Location,
};

/// Initial rows for the in-memory repositories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub companies: Vec<Company>,
    pub departments: Vec<Department>,
    pub locations: Vec<Location>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).context("seed data is not valid JSON")
    }

    pub async fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read seed file {}", path.display()))?;

        let seed = Self::from_json(&json)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;

        info!(
            companies = seed.companies.len(),
            departments = seed.departments.len(),
            locations = seed.locations.len(),
            "seed data loaded"
        );

        Ok(seed)
    }
}
