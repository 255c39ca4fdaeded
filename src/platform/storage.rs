//! Level pack storage
//!
//! A level pack is a JSON array of schemes:
//! `[["  @ ", "xxxx"], ["o  ", "xx!"]]`

use std::path::PathBuf;

use super::{LevelLoader, Scheme};
use crate::error::SimError;

/// Reads a level pack from a JSON file
#[derive(Debug, Clone)]
pub struct JsonLevelLoader {
    path: PathBuf,
}

impl JsonLevelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(json: &str) -> Result<Vec<Scheme>, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl LevelLoader for JsonLevelLoader {
    fn load_schemes(&self) -> Result<Vec<Scheme>, SimError> {
        let json = std::fs::read_to_string(&self.path)?;
        let schemes = Self::parse(&json)?;
        log::info!("Loaded {} levels from {}", schemes.len(), self.path.display());
        Ok(schemes)
    }
}

/// Schemes already held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticLevels(pub Vec<Scheme>);

impl StaticLevels {
    pub fn from_rows(schemes: &[&[&str]]) -> Self {
        Self(
            schemes
                .iter()
                .map(|rows| rows.iter().map(|row| row.to_string()).collect())
                .collect(),
        )
    }
}

impl LevelLoader for StaticLevels {
    fn load_schemes(&self) -> Result<Vec<Scheme>, SimError> {
        Ok(self.0.clone())
    }
}
