//! Persisted set of result URLs already processed by earlier batches.

use crate::error::{LedgerError, LedgerResult};
use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

const URL_COLUMN: &str = "url";

/// Ordered set of seen result URLs.
///
/// Loaded before a batch, passed through it by value, and saved after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenUrls(BTreeSet<String>);

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.contains(url)
    }

    /// Returns `true` if the URL was not already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.0.insert(url.into())
    }

    pub fn extend<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(urls.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// URLs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Load a ledger file. A missing file is an empty ledger.
    pub fn load(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No ledger at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let file = std::fs::File::open(path)?;
        let seen = Self::read_from(file)?;
        debug!("Loaded {} seen URL(s) from {}", seen.len(), path.display());
        Ok(seen)
    }

    /// Read ledger CSV with a `url` header column. Blank cells are skipped.
    pub fn read_from<R: Read>(reader: R) -> LedgerResult<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let column = reader
            .headers()?
            .iter()
            .position(|h| h.trim() == URL_COLUMN)
            .ok_or(LedgerError::MissingColumn)?;

        let mut seen = Self::new();
        for record in reader.records() {
            let record = record?;
            if let Some(url) = record.get(column).map(str::trim).filter(|u| !u.is_empty()) {
                seen.insert(url);
            }
        }
        Ok(seen)
    }

    /// Overwrite the ledger file with the sorted URL set.
    pub fn save(&self, path: impl AsRef<Path>) -> LedgerResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_to(file)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record([URL_COLUMN])?;
        for url in self.iter() {
            writer.write_record([url])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl FromIterator<String> for SeenUrls {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
