// src/bank.rs

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{error::AppError, models::question::QuestionRecord};

/// Read-only question bank, loaded once at startup and shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
    index: HashMap<i64, usize>,
}

impl QuestionBank {
    /// Builds a bank, rejecting invalid records and duplicate ids.
    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self, AppError> {
        let mut index = HashMap::with_capacity(records.len());

        for (pos, record) in records.iter().enumerate() {
            record.check()?;
            if index.insert(record.id, pos).is_some() {
                return Err(AppError::InvalidBank(format!(
                    "duplicate question id {}",
                    record.id
                )));
            }
        }

        Ok(Self { records, index })
    }

    /// Reads a persisted bank (JSON array of question records).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Io(format!("failed to read bank {}: {}", path.display(), e))
        })?;
        let records: Vec<QuestionRecord> = serde_json::from_str(&raw)?;

        let bank = Self::from_records(records)?;
        tracing::info!("Loaded {} questions from {}", bank.len(), path.display());
        if let Some(first) = bank.records.first() {
            tracing::debug!("Sample question: {:?}", first);
        }

        Ok(bank)
    }

    pub fn get(&self, id: i64) -> Option<&QuestionRecord> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Ids in bank order.
    pub fn ids(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Writes records as a pretty-printed JSON array, non-ASCII text kept as is.
pub fn save_bank(path: impl AsRef<Path>, records: &[QuestionRecord]) -> Result<(), AppError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    fs::write(path, json).map_err(|e| {
        AppError::Io(format!("failed to write bank {}: {}", path.display(), e))
    })?;
    Ok(())
}
