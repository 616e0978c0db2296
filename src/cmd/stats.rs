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

use clap::ValueEnum;
use maud::html;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::CatalogSource;
use crate::engine::filter::count_modifiers;
use crate::error::Fallible;
use crate::types::term::Term;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// HTML output.
    Html,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Html => write!(f, "html"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub async fn print_catalog_stats(source: &CatalogSource, format: StatsFormat) -> Fallible<()> {
    let catalog = Catalog::load(source).await?;
    let stats = Stats::new(&catalog.terms);
    println!("{}", render_stats(&stats, format)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    term_count: usize,
    weekly_count: usize,
    repeat_count: usize,
}

impl Stats {
    pub fn new(terms: &[Term]) -> Self {
        let counts = count_modifiers(terms);
        Self {
            term_count: terms.len(),
            weekly_count: counts.weekly,
            repeat_count: counts.repeat,
        }
    }
}

fn render_stats(stats: &Stats, format: StatsFormat) -> Fallible<String> {
    match format {
        StatsFormat::Html => {
            let markup = html! {
                table.stats {
                    tr { th { "Terms" } td { (stats.term_count) } }
                    tr { th { "Weekly" } td { (stats.weekly_count) } }
                    tr { th { "Repeats" } td { (stats.repeat_count) } }
                }
            };
            Ok(markup.into_string())
        }
        StatsFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}
