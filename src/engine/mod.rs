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

//! The flashcard engine: search and toggle filtering over the catalog,
//! navigation through the filtered view, and the card flip animation.

pub mod cursor;
pub mod filter;
pub mod flip;

use crate::engine::cursor::Cursor;
use crate::engine::cursor::Direction;
use crate::engine::filter::Counts;
use crate::engine::filter::FilterState;
use crate::engine::filter::MatchSpan;
use crate::engine::filter::ViewEntry;
use crate::engine::filter::count_modifiers;
use crate::engine::filter::filter_terms;
use crate::engine::flip::FlipAnimation;
use crate::types::term::Term;
use crate::types::term_hash::TermHash;

pub struct Engine {
    terms: Vec<Term>,
    counts: Counts,
    filter: FilterState,
    view: Vec<ViewEntry>,
    cursor: Cursor,
    flip: FlipAnimation,
}

/// A term in the filtered view.
pub struct ViewItem<'a> {
    pub term: &'a Term,
    pub span: Option<MatchSpan>,
}

impl Engine {
    pub fn new(terms: Vec<Term>, flip_steps: u32) -> Self {
        let counts = count_modifiers(&terms);
        let filter = FilterState::default();
        let view = filter_terms(&terms, &filter);
        let cursor = Cursor::reset(view.len());
        Self {
            terms,
            counts,
            filter,
            view,
            cursor,
            flip: FlipAnimation::new(flip_steps),
        }
    }

    pub fn total_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view(&self) -> impl Iterator<Item = ViewItem<'_>> {
        self.view.iter().map(|entry| ViewItem {
            term: &self.terms[entry.index],
            span: entry.span,
        })
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// The cursor's position in the filtered view.
    pub fn position(&self) -> Option<usize> {
        self.cursor.position()
    }

    /// The position of the active card in the filtered view.
    pub fn active_position(&self) -> Option<usize> {
        self.cursor.active()
    }

    pub fn active_term(&self) -> Option<&Term> {
        self.cursor
            .active()
            .and_then(|position| self.view.get(position))
            .map(|entry| &self.terms[entry.index])
    }

    /// A label like `3 / 10` for the active card's position.
    pub fn progress_label(&self) -> String {
        let current = self.cursor.active().map(|p| p + 1).unwrap_or(0);
        format!("{} / {}", current, self.view.len())
    }

    pub fn flip(&self) -> &FlipAnimation {
        &self.flip
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.filter.set_search_text(text);
        self.refresh();
    }

    pub fn set_weekly(&mut self, on: bool) {
        self.filter.set_weekly(on);
        self.refresh();
    }

    pub fn set_repeats(&mut self, on: bool) {
        self.filter.set_repeats(on);
        self.refresh();
    }

    /// Makes the term with the given hash the active card. Returns false if
    /// the term is not in the filtered view.
    pub fn select_term(&mut self, hash: TermHash) -> bool {
        let position = self
            .view
            .iter()
            .position(|entry| self.terms[entry.index].hash() == hash);
        match position {
            Some(position) => {
                self.cursor.select(position, self.view.len());
                self.flip.reset();
                true
            }
            None => {
                log::debug!("Term {hash} is not in the filtered view.");
                false
            }
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.cursor.navigate(direction, self.view.len()) {
            self.flip.reset();
            true
        } else {
            false
        }
    }

    /// Starts flipping the active card. Does nothing if there is none.
    pub fn trigger_flip(&mut self) -> bool {
        if self.active_term().is_none() {
            return false;
        }
        self.flip.trigger();
        true
    }

    /// Advances the flip animation by one frame.
    pub fn tick(&mut self) -> bool {
        self.flip.tick()
    }

    /// Runs the flip animation to completion, returning the scale factor of
    /// each frame.
    pub fn drain_flip_frames(&mut self) -> Vec<f64> {
        self.flip.drain()
    }

    fn refresh(&mut self) {
        self.view = filter_terms(&self.terms, &self.filter);
        self.cursor = Cursor::reset(self.view.len());
        self.flip.reset();
        log::debug!(
            "Filter {:?} weekly={} repeats={} matched {} of {} terms.",
            self.filter.search_text(),
            self.filter.weekly_only(),
            self.filter.repeats_only(),
            self.view.len(),
            self.terms.len()
        );
    }
}
