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

use crate::catalog::Catalog;
use crate::catalog::CatalogSource;
use crate::engine::Engine;
use crate::engine::flip::DEFAULT_FLIP_STEPS;
use crate::error::Fallible;

pub async fn search_catalog(
    source: &CatalogSource,
    query: &str,
    weekly: bool,
    repeats: bool,
) -> Fallible<()> {
    let catalog = Catalog::load(source).await?;
    let mut engine = Engine::new(catalog.terms, DEFAULT_FLIP_STEPS);
    engine.set_weekly(weekly);
    engine.set_repeats(repeats);
    engine.set_search_text(query);
    print!("{}", render_results(&engine));
    Ok(())
}

/// Lists the filtered view, one term per line, with the match in brackets.
/// The active card is starred and its back is printed beneath it.
fn render_results(engine: &Engine) -> String {
    let mut out = String::new();
    let active = engine.active_position();
    for (position, item) in engine.view().enumerate() {
        let front = match item.span {
            Some(span) => {
                let (before, matched, after) = span.split(item.term.front());
                format!("{before}[{matched}]{after}")
            }
            None => item.term.front().to_string(),
        };
        let marker = if active == Some(position) { "*" } else { " " };
        let tag = if item.term.is_repeat() {
            " (repeat)"
        } else if item.term.is_weekly() {
            " (weekly)"
        } else {
            ""
        };
        out.push_str(&format!("{marker} {front}{tag}\n"));
        if active == Some(position) {
            out.push_str(&format!("    {}\n", item.term.back()));
        }
    }
    if engine.view_len() == 0 {
        out.push_str("No terms found.\n");
    }
    let counts = engine.counts();
    out.push_str(&format!(
        "{} | weekly: {} | repeats: {}\n",
        engine.progress_label(),
        counts.weekly,
        counts.repeat
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::term::Term;

    fn engine() -> Engine {
        Engine::new(
            vec![
                Term::new(0, "cat", "a feline"),
                Term::new(1, "dog!", "a canine"),
                Term::new(2, "fox!R", "a vulpine"),
            ],
            DEFAULT_FLIP_STEPS,
        )
    }

    #[test]
    fn test_single_match() {
        let mut engine = engine();
        engine.set_search_text("at");
        assert_eq!(
            render_results(&engine),
            "* c[at]\n    a feline\n1 / 1 | weekly: 2 | repeats: 1\n"
        );
    }

    #[test]
    fn test_weekly() {
        let mut engine = engine();
        engine.set_weekly(true);
        assert_eq!(
            render_results(&engine),
            "  dog (weekly)\n  fox (repeat)\n0 / 2 | weekly: 2 | repeats: 1\n"
        );
    }

    #[test]
    fn test_no_match() {
        let mut engine = engine();
        engine.set_search_text("zebra");
        assert_eq!(
            render_results(&engine),
            "No terms found.\n0 / 0 | weekly: 2 | repeats: 1\n"
        );
    }
}
