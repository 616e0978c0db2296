// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;
use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::term::Term;

/// Where the term catalog is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::File(PathBuf::from(source))
        }
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// The spreadsheet API wraps rows in an envelope. Plain arrays of rows are
/// also accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Rows(Vec<Value>),
    Envelope {
        success: Option<bool>,
        data: Vec<Value>,
    },
}

#[derive(Deserialize)]
struct Row {
    #[serde(rename = "Front")]
    front: String,
    #[serde(rename = "Back")]
    back: String,
}

pub struct Catalog {
    pub terms: Vec<Term>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    pub async fn load(source: &CatalogSource) -> Fallible<Self> {
        log::debug!("Loading catalog from {source}...");
        let start = Instant::now();
        let text: String = match source {
            CatalogSource::File(path) => {
                if !path.exists() {
                    return fail(format!("catalog file {} does not exist.", path.display()));
                }
                read_to_string(path)?
            }
            CatalogSource::Url(url) => {
                reqwest::get(url)
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
        };
        let terms = parse_catalog(&text)?;
        let end = Instant::now();
        let duration = end.duration_since(start).as_millis();
        log::debug!("Catalog loaded in {duration}ms.");
        Ok(Self { terms })
    }

    /// Loads the catalog, falling back to an empty one if loading fails.
    pub async fn load_or_empty(source: &CatalogSource) -> Self {
        match Self::load(source).await {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load catalog from {source}: {e}");
                Self::empty()
            }
        }
    }
}

/// Parses catalog JSON. Rows without a string `Front` and `Back` are skipped,
/// as are rows whose front is empty once modifiers are removed.
pub fn parse_catalog(text: &str) -> Fallible<Vec<Term>> {
    let payload: Payload = serde_json::from_str(text)?;
    let rows = match payload {
        Payload::Rows(rows) => rows,
        Payload::Envelope { success, data } => {
            if success == Some(false) {
                return fail("catalog source reported failure.");
            }
            data
        }
    };
    let mut terms = Vec::new();
    for (index, value) in rows.into_iter().enumerate() {
        match serde_json::from_value::<Row>(value) {
            Ok(row) => {
                let term = Term::new(terms.len(), row.front, row.back);
                if term.front().is_empty() {
                    log::warn!("Skipping row {index}: empty front.");
                } else {
                    terms.push(term);
                }
            }
            Err(e) => {
                log::warn!("Skipping row {index}: {e}");
            }
        }
    }
    Ok(terms)
}
