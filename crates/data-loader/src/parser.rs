//! Parser for the film catalog CSV export.
//!
//! The input is comma-delimited text with a header row, where the
//! categorical columns (`genres`, `production_companies`, `keywords`) hold
//! JSON arrays of objects, CSV-quoted with doubled internal quote
//! characters:
//!
//! ```text
//! original_title,genres,vote_average
//! Heat,"[{""id"": 28, ""name"": ""Action""}]",7.7
//! ```
//!
//! Parsing is row-local: a row that is too short, or whose required fields
//! come out empty, is dropped and the parse continues. Only undecodable
//! input (I/O, UTF-8, unusable header) fails the whole load.

use crate::error::{DataLoadError, Result};
use crate::types::{Catalog, FilmRecord, Schema};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Column names recognized in the header.
const COL_TITLE: &str = "original_title";
const COL_GENRES: &str = "genres";
const COL_COMPANIES: &str = "production_companies";
const COL_KEYWORDS: &str = "keywords";
const COL_TAGLINE: &str = "tagline";
const COL_VOTE_AVERAGE: &str = "vote_average";
const COL_RUNTIME: &str = "runtime";

/// Split one row on commas, ignoring commas inside double-quoted spans.
///
/// A comma is a delimiter only when an even number of quote characters
/// precede it on the line, so `"Action, Adventure"` stays one field.
pub fn split_row(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quotes = 0usize;

    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => quotes += 1,
            ',' if quotes % 2 == 0 => {
                fields.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Shape of the objects inside the embedded arrays. Other properties
/// (`id`, ...) are ignored by serde.
#[derive(Deserialize)]
struct NamedObject {
    name: String,
}

/// Decode a CSV-quoted JSON array of name-bearing objects into the
/// projected `name` values.
///
/// Contract: any field that cannot be decoded yields an empty sequence —
/// the caller decides whether that makes the row inadmissible. Steps:
/// fields shorter than 3 characters are treated as empty, one layer of
/// enclosing quotes is stripped, doubled internal quotes are unescaped,
/// and the result is decoded as JSON.
pub fn decode_name_array(field: &str) -> Vec<String> {
    let field = field.trim();
    if field.len() < 3 {
        return Vec::new();
    }

    let inner = field
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(field);
    let json = inner.replace("\"\"", "\"");

    match serde_json::from_str::<Vec<NamedObject>>(&json) {
        Ok(objects) => objects.into_iter().map(|o| o.name).collect(),
        Err(err) => {
            tracing::debug!(%err, "undecodable embedded array, treating as empty");
            Vec::new()
        }
    }
}

/// Trim a free-text field and strip one layer of surrounding quotes.
fn clean_text(field: &str) -> String {
    let trimmed = field.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    inner.replace("\"\"", "\"")
}

/// Locale-invariant float parse; missing or unparsable text is 0.
fn parse_float(field: &str) -> f32 {
    field.trim().parse::<f32>().unwrap_or(0.0)
}

/// Column positions resolved once from the header by name.
///
/// `title` and `genres` are mandatory; the rest are resolved only when the
/// active schema asks for them.
struct ColumnLayout {
    title: usize,
    genres: usize,
    production_companies: Option<usize>,
    keywords: Option<usize>,
    tagline: Option<usize>,
    vote_average: Option<usize>,
    runtime: Option<usize>,
}

impl ColumnLayout {
    fn resolve(header: &[&str], schema: &Schema) -> Result<Self> {
        let required = |name: &str| -> Result<usize> {
            header
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    name: name.to_string(),
                })
        };
        let wanted = |name: &str, enabled: bool| -> Result<Option<usize>> {
            if enabled {
                required(name).map(Some)
            } else {
                Ok(None)
            }
        };

        Ok(Self {
            title: required(COL_TITLE)?,
            genres: required(COL_GENRES)?,
            production_companies: wanted(COL_COMPANIES, schema.production_companies)?,
            keywords: wanted(COL_KEYWORDS, schema.keywords)?,
            tagline: wanted(COL_TAGLINE, schema.tagline)?,
            vote_average: wanted(COL_VOTE_AVERAGE, schema.vote_average)?,
            runtime: wanted(COL_RUNTIME, schema.runtime)?,
        })
    }
}

/// Parse one data row into a record, or `None` if the row is malformed or
/// fails the admission invariant (non-empty title and genres).
fn parse_row(line: &str, layout: &ColumnLayout, width: usize) -> Option<FilmRecord> {
    let values = split_row(line);
    if values.len() < width {
        tracing::debug!(
            columns = values.len(),
            expected = width,
            "dropping short row"
        );
        return None;
    }

    let title = values[layout.title].trim().to_string();
    let genres = decode_name_array(values[layout.genres]);
    if title.is_empty() || genres.is_empty() {
        tracing::debug!(%title, "dropping row without title or genres");
        return None;
    }

    Some(FilmRecord {
        title,
        genres,
        production_companies: layout
            .production_companies
            .map(|i| decode_name_array(values[i]))
            .unwrap_or_default(),
        keywords: layout
            .keywords
            .map(|i| decode_name_array(values[i]))
            .unwrap_or_default(),
        tagline: layout
            .tagline
            .map(|i| clean_text(values[i]))
            .unwrap_or_default(),
        vote_average: layout.vote_average.map(|i| parse_float(values[i])).unwrap_or(0.0),
        runtime: layout.runtime.map(|i| parse_float(values[i])).unwrap_or(0.0),
    })
}

impl Catalog {
    /// Parse a raw catalog export into a catalog.
    ///
    /// Output order matches input row order. Rows are independent, so they
    /// are parsed in parallel; the indexed collect preserves order.
    pub fn from_csv_str(text: &str, schema: &Schema) -> Result<Self> {
        let mut lines = text.lines();
        let header_line = lines.next().ok_or(DataLoadError::EmptyInput)?;
        let header: Vec<&str> = split_row(header_line).iter().map(|h| h.trim()).collect();
        let layout = ColumnLayout::resolve(&header, schema)?;
        let width = header.len();

        let rows: Vec<&str> = lines.filter(|line| !line.trim().is_empty()).collect();
        let films: Vec<FilmRecord> = rows
            .par_iter()
            .filter_map(|line| parse_row(line, &layout, width))
            .collect();

        tracing::debug!(
            rows = rows.len(),
            admitted = films.len(),
            "parsed film catalog"
        );
        Ok(Catalog::from_records(films))
    }

    /// Read and parse a catalog file.
    ///
    /// Fails on I/O errors and non-UTF-8 content; everything row-local is
    /// handled inside [`Catalog::from_csv_str`].
    pub fn load_from_file(path: &Path, schema: &Schema) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        Self::from_csv_str(&text, schema)
    }
}
