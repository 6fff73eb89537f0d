// src/extractor/document.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Page separator written by PDF-to-text converters.
const PAGE_BREAK: char = '\x0c';

/// Anything that can hand over the text of a document page by page.
pub trait DocumentSource {
    fn pages(&self) -> Result<Vec<String>, AppError>;

    /// Every page followed by a newline, concatenated.
    fn full_text(&self) -> Result<String, AppError> {
        let mut text = String::new();
        for page in self.pages()? {
            text.push_str(&page);
            text.push('\n');
        }
        Ok(text)
    }
}

/// A document already converted to text, pages split on form feeds.
#[derive(Debug, Clone)]
pub struct PlainTextDocument {
    path: PathBuf,
}

impl PlainTextDocument {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for PlainTextDocument {
    fn pages(&self) -> Result<Vec<String>, AppError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Io(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let mut pages: Vec<String> = raw.split(PAGE_BREAK).map(str::to_string).collect();
        // A trailing form feed leaves an empty last page behind.
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Ok(pages)
    }
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument(pub Vec<String>);

impl DocumentSource for InMemoryDocument {
    fn pages(&self) -> Result<Vec<String>, AppError> {
        Ok(self.0.clone())
    }
}
