//! Input documents: text, an optional creation time, and pre-tokenized
//! reference tokens.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chronoforge_core::ReferenceToken;
use serde::Deserialize;
use tokio::fs;

/// `{ "text": ..., "dct": "2020-06-15", "tokens": [{ "text", "start", "end", "pos", "sentence" }] }`
#[derive(Debug, Deserialize)]
pub struct InputDocument {
    pub text: String,
    #[serde(default)]
    pub dct: Option<String>,
    #[serde(default)]
    pub tokens: Vec<ReferenceToken>,
}

impl InputDocument {
    pub fn parse(raw: &str) -> Result<Self> {
        let doc: InputDocument = serde_json::from_str(raw).context("Invalid input document JSON")?;
        doc.check_spans()?;
        Ok(doc)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input document: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("In {}", path.display()))
    }

    /// Document creation time, if one was given.
    pub fn doc_time(&self) -> Result<Option<NaiveDateTime>> {
        self.dct.as_deref().map(parse_dct).transpose()
    }

    fn check_spans(&self) -> Result<()> {
        for (i, token) in self.tokens.iter().enumerate() {
            if token.span.end < token.span.start || token.span.slice(&self.text).is_none() {
                bail!(
                    "token {i} ({:?}) has span {}..{} outside the document text",
                    token.text,
                    token.span.start,
                    token.span.end
                );
            }
        }
        Ok(())
    }
}

/// ISO date (`2020-06-15`) or datetime (`2020-06-15T08:30:00`, a space
/// separator also works). Dates are taken at midnight.
pub fn parse_dct(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN)),
        Err(_) => bail!("Unrecognized document creation time '{raw}'; expected an ISO date or datetime"),
    }
}
