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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::engine::Engine;
use crate::engine::filter::MatchSpan;
use crate::types::term::Term;

/// Milliseconds per animation frame.
const FRAME_MS: usize = 16;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut engine = match state.engine.lock() {
        Ok(engine) => engine,
        Err(_) => {
            log::error!("Engine lock is poisoned.");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            );
        }
    };
    let body = render_body(&mut engine);
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_body(engine: &mut Engine) -> Markup {
    // Play any pending flip before reading the card.
    let card = render_card(engine);
    let filter = engine.filter().clone();
    let counts = engine.counts();
    let active = engine.active_position();
    html! {
        div.root {
            div.filters {
                form.search action="/" method="post" {
                    input type="hidden" name="action" value="Search";
                    input id="search" type="text" name="query" value=(filter.search_text())
                        placeholder="Search for a term..." autocomplete="off";
                }
                form.toggles action="/" method="post" {
                    button.toggle .on[filter.weekly_only()] id="weekly" type="submit" name="action" value="Weekly" {
                        "Weekly (" (counts.weekly) ")"
                    }
                    button.toggle .on[filter.repeats_only()] id="repeats" type="submit" name="action" value="Repeats" {
                        "Repeats (" (counts.repeat) ")"
                    }
                }
            }
            ul.terms {
                @for (position, item) in engine.view().enumerate() {
                    li.term .active[active == Some(position)] {
                        form action="/" method="post" {
                            input type="hidden" name="term" value=(item.term.hash().to_hex());
                            button type="submit" name="action" value="Select" {
                                (render_front(item.term, item.span))
                            }
                        }
                    }
                }
            }
            (card)
            div.progress {
                (engine.progress_label())
            }
            div.controls {
                form action="/" method="post" {
                    input id="prev" type="submit" name="action" value="Prev";
                    input id="flip" type="submit" name="action" value="Flip";
                    input id="next" type="submit" name="action" value="Next";
                }
            }
        }
    }
}

fn render_front(term: &Term, span: Option<MatchSpan>) -> Markup {
    match span {
        Some(span) => {
            let (before, matched, after) = span.split(term.front());
            html! {
                (before) strong { (matched) } (after)
            }
        }
        None => html! {
            (term.front())
        },
    }
}

fn render_card(engine: &mut Engine) -> Markup {
    let frames: Vec<f64> = engine.drain_flip_frames();
    let Some(term) = engine.active_term() else {
        return html! {
            div.card.empty {
                p { "Search for a term..." }
            }
        };
    };
    let text = if engine.flip().is_flipped() {
        term.back()
    } else {
        term.front()
    };
    if frames.is_empty() {
        html! {
            div.card {
                p { (text) }
            }
        }
    } else {
        html! {
            style {
                (PreEscaped(flip_keyframes(&frames)))
            }
            div.card.flipping {
                p { (text) }
            }
        }
    }
}

/// CSS that plays the given horizontal scale factors, one per frame.
fn flip_keyframes(frames: &[f64]) -> String {
    let mut css = String::from("@keyframes flip {\n");
    for (index, scale) in frames.iter().enumerate() {
        let percent = index * 100 / frames.len();
        css.push_str(&format!(
            "  {percent}% {{ transform: scaleX({scale:.3}); }}\n"
        ));
    }
    css.push_str("  100% { transform: scaleX(1); }\n}\n");
    css.push_str(&format!(
        ".card.flipping {{ animation: flip {}ms linear; }}\n",
        frames.len() * FRAME_MS
    ));
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cursor::Direction;

    fn engine() -> Engine {
        Engine::new(
            vec![
                Term::new(0, "cat", "a feline"),
                Term::new(1, "dog!", "a canine"),
                Term::new(2, "fox!R", "a vulpine"),
            ],
            10,
        )
    }

    #[test]
    fn test_keyframes() {
        let css = flip_keyframes(&[1.0, 0.0, -1.0, 0.5]);
        assert!(css.contains("  0% { transform: scaleX(1.000); }"));
        assert!(css.contains("  25% { transform: scaleX(0.000); }"));
        assert!(css.contains("  50% { transform: scaleX(-1.000); }"));
        assert!(css.contains("  75% { transform: scaleX(0.500); }"));
        assert!(css.contains("animation: flip 64ms linear;"));
    }

    #[test]
    fn test_placeholder_without_active_card() {
        let mut engine = engine();
        let html = render_body(&mut engine).into_string();
        assert!(html.contains("<div class=\"card empty\">"));
        assert!(html.contains("0 / 3"));
        assert!(html.contains("Weekly (2)"));
        assert!(html.contains("Repeats (1)"));
    }

    #[test]
    fn test_highlight() {
        let mut engine = engine();
        engine.set_search_text("at");
        let html = render_body(&mut engine).into_string();
        assert!(html.contains("c<strong>at</strong>"));
        assert!(html.contains("1 / 1"));
    }

    #[test]
    fn test_flip_plays_once() {
        let mut engine = engine();
        engine.navigate(Direction::Forward);
        engine.trigger_flip();
        let html = render_body(&mut engine).into_string();
        assert!(html.contains("@keyframes flip"));
        assert!(html.contains("a feline"));
        let html = render_body(&mut engine).into_string();
        assert!(!html.contains("@keyframes flip"));
        assert!(html.contains("a feline"));
    }
}
