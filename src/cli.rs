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

use clap::Parser;

use crate::catalog::CatalogSource;
use crate::cmd::check::check_catalog;
use crate::cmd::search::search_catalog;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_catalog_stats;
use crate::config::Config;
use crate::config::Overrides;
use crate::drill::server::start_server;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Browse the catalog in the browser.
    Drill {
        /// Path or URL of the catalog.
        #[arg(long)]
        source: Option<String>,
        /// Port to serve on.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
    },
    /// Search the catalog and print the matching terms.
    Search {
        /// Text to search for.
        query: Option<String>,
        /// Only weekly terms.
        #[arg(long)]
        weekly: bool,
        /// Only repeated terms. Implies --weekly.
        #[arg(long)]
        repeats: bool,
        /// Path or URL of the catalog.
        #[arg(long)]
        source: Option<String>,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
    },
    /// Check that the catalog loads.
    Check {
        /// Path or URL of the catalog.
        #[arg(long)]
        source: Option<String>,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
    },
    /// Print catalog statistics.
    Stats {
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
        /// Path or URL of the catalog.
        #[arg(long)]
        source: Option<String>,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            source,
            port,
            no_open,
            config,
        } => {
            let config = Config::load(Overrides {
                config,
                source,
                port,
                no_open,
            })?;
            start_server(config).await
        }
        Command::Search {
            query,
            weekly,
            repeats,
            source,
            config,
        } => {
            let source = catalog_source(config, source)?;
            search_catalog(&source, query.as_deref().unwrap_or(""), weekly, repeats).await
        }
        Command::Check { source, config } => {
            let source = catalog_source(config, source)?;
            check_catalog(&source).await?;
            Ok(())
        }
        Command::Stats {
            format,
            source,
            config,
        } => {
            let source = catalog_source(config, source)?;
            print_catalog_stats(&source, format).await
        }
    }
}

fn catalog_source(config: Option<String>, source: Option<String>) -> Fallible<CatalogSource> {
    let config = Config::load(Overrides {
        config,
        source,
        ..Overrides::default()
    })?;
    Ok(config.source)
}
