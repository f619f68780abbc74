// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::ReaderBuilder;

use crate::error::PipelineError;
use crate::models::RawRow;
use crate::utils::http_client;

/// Somewhere a table of raw rows can be fetched from, once per run.
pub trait TableSource {
    fn location(&self) -> &str;
    fn fetch(&self) -> Result<Vec<RawRow>, PipelineError>;
}

/// A published spreadsheet export served over HTTP(S).
pub struct HttpCsvSource {
    url: String,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TableSource for HttpCsvSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<RawRow>, PipelineError> {
        let client = http_client().map_err(|e| PipelineError::unavailable(&self.url, e))?;
        tracing::info!(url = %self.url, "fetching sheet export");
        let body = client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| PipelineError::unavailable(&self.url, e))?;
        read_csv(&body[..]).map_err(|reason| PipelineError::unavailable(&self.url, reason))
    }
}

/// A CSV export saved on disk.
pub struct FileCsvSource {
    path: PathBuf,
    display: String,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl TableSource for FileCsvSource {
    fn location(&self) -> &str {
        &self.display
    }

    fn fetch(&self) -> Result<Vec<RawRow>, PipelineError> {
        tracing::info!(path = %self.display, "reading sheet export");
        let file = File::open(&self.path).map_err(|e| PipelineError::unavailable(&self.display, e))?;
        read_csv(file).map_err(|reason| PipelineError::unavailable(&self.display, reason))
    }
}

pub fn source_for(location: &str) -> Box<dyn TableSource> {
    let trimmed = location.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpCsvSource::new(trimmed))
    } else {
        Box::new(FileCsvSource::new(trimmed))
    }
}

/// Parse CSV text with a header row into raw rows.
///
/// Rows may be ragged; missing trailing cells are simply absent from the row.
/// Rows of blank cells are kept so the normalizer can count them.
/// Cells are decoded lossily so a stray byte cannot fail the whole table.
/// Only a missing header row or an I/O failure is an error.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<RawRow>, String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = rdr
        .byte_headers()
        .map_err(|e| format!("unreadable header row: {}", e))?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err("no header row".to_string());
    }

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let rec = result.map_err(|e| format!("unreadable table: {}", e))?;
        let cells = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, v)| (h.clone(), String::from_utf8_lossy(v).trim().to_string()))
            .collect();
        let row = RawRow::new(cells);
        rows.push(match rec.position() {
            Some(pos) => row.at_line(pos.line()),
            None => row,
        });
    }
    tracing::debug!(rows = rows.len(), columns = headers.len(), "parsed csv table");
    Ok(rows)
}
