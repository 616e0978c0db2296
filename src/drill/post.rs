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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::drill::state::ServerState;
use crate::engine::Engine;
use crate::engine::cursor::Direction;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::term_hash::TermHash;

#[derive(Debug, Deserialize)]
enum Action {
    Search,
    Weekly,
    Repeats,
    Select,
    Prev,
    Next,
    Flip,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    query: Option<String>,
    term: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("error: {e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    let mut engine = state
        .engine
        .lock()
        .map_err(|_| ErrorReport::new("engine lock is poisoned"))?;
    log::debug!("Action: {:?}", form.action);
    apply_action(&mut engine, form)
}

fn apply_action(engine: &mut Engine, form: FormData) -> Fallible<()> {
    match form.action {
        Action::Search => {
            engine.set_search_text(form.query.as_deref().unwrap_or(""));
        }
        Action::Weekly => {
            let on = !engine.filter().weekly_only();
            engine.set_weekly(on);
        }
        Action::Repeats => {
            let on = !engine.filter().repeats_only();
            engine.set_repeats(on);
        }
        Action::Select => {
            let hash = match form.term {
                Some(term) => TermHash::from_hex(&term)?,
                None => return fail("no term selected."),
            };
            engine.select_term(hash);
        }
        Action::Prev => {
            engine.navigate(Direction::Backward);
        }
        Action::Next => {
            engine.navigate(Direction::Forward);
        }
        Action::Flip => {
            engine.trigger_flip();
        }
    }
    Ok(())
}
