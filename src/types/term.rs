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

use crate::types::term_hash::Hasher;
use crate::types::term_hash::TermHash;

/// Marks a term as part of this week's set.
const WEEKLY_MARKER: &str = "!";

/// Marks a weekly term that is being repeated from an earlier week.
const REPEAT_MARKER: &str = "!R";

/// A vocabulary term. The modifiers encoded in the raw front text are parsed
/// once, on construction.
#[derive(Clone, Debug)]
pub struct Term {
    /// The term's position in the catalog.
    position: usize,
    /// The front text as it appears in the catalog, modifiers included.
    raw_front: String,
    /// The front text with modifiers removed.
    front: String,
    back: String,
    is_weekly: bool,
    is_repeat: bool,
    /// The cached hash of the position and raw text. Unique within a
    /// catalog, even when rows repeat.
    hash: TermHash,
}

impl Term {
    pub fn new(position: usize, raw_front: impl Into<String>, back: impl Into<String>) -> Self {
        let raw_front: String = raw_front.into();
        let back: String = back.into();
        let is_repeat = raw_front.contains(REPEAT_MARKER);
        // Every repeat marker contains the weekly marker.
        let is_weekly = raw_front.contains(WEEKLY_MARKER);
        let front = strip_modifiers(&raw_front).trim().to_string();
        let hash = {
            let mut hasher = Hasher::new();
            hasher.update(&(position as u64).to_le_bytes());
            hasher.update(raw_front.as_bytes());
            hasher.update(&[0]);
            hasher.update(back.as_bytes());
            hasher.finalize()
        };
        Self {
            position,
            raw_front,
            front,
            back,
            is_weekly,
            is_repeat,
            hash,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn raw_front(&self) -> &str {
        &self.raw_front
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn is_weekly(&self) -> bool {
        self.is_weekly
    }

    pub fn is_repeat(&self) -> bool {
        self.is_repeat
    }

    pub fn hash(&self) -> TermHash {
        self.hash
    }
}

/// Removes the weekly and repeat markers from a piece of text.
pub fn strip_modifiers(text: &str) -> String {
    text.replace(REPEAT_MARKER, "").replace(WEEKLY_MARKER, "")
}
