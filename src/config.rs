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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::CatalogSource;
use crate::engine::flip::DEFAULT_FLIP_STEPS;
use crate::error::Fallible;
use crate::error::fail;

/// Looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "termcards.toml";

pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_SOURCE: &str =
    "https://sheets.livepolls.app/api/spreadsheets/e20fc709-853b-45be-aa86-8fd4ea90ef8a/Sheet1";

#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source: Option<String>,
    port: Option<u16>,
    flip_steps: Option<u32>,
    open_browser: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub source: CatalogSource,
    pub port: u16,
    /// Ticks per card flip.
    pub flip_steps: u32,
    pub open_browser: bool,
}

/// Command-line flags. These take precedence over the config file.
#[derive(Default)]
pub struct Overrides {
    pub config: Option<String>,
    pub source: Option<String>,
    pub port: Option<u16>,
    pub no_open: bool,
}

impl Config {
    pub fn load(overrides: Overrides) -> Fallible<Self> {
        let file: ConfigFile = match &overrides.config {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                log::debug!("Reading config from {}", path.display());
                toml::from_str(&read_to_string(path)?)?
            }
            None => {
                let path = current_dir()?.join(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    log::debug!("Reading config from {}", path.display());
                    toml::from_str(&read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        Self::resolve(file, overrides)
    }

    fn resolve(file: ConfigFile, overrides: Overrides) -> Fallible<Self> {
        let source = overrides
            .source
            .or(file.source)
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let flip_steps = file.flip_steps.unwrap_or(DEFAULT_FLIP_STEPS);
        if flip_steps == 0 {
            return fail("flip_steps must be at least 1.");
        }
        Ok(Self {
            source: CatalogSource::parse(&source),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            flip_steps,
            open_browser: !overrides.no_open && file.open_browser.unwrap_or(true),
        })
    }
}
