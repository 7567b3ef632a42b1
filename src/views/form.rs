// src/views/form.rs

use maud::{Markup, html};
use serde_json::json;

use crate::models::{Difficulty, GenerationParams};

pub const PARAMS_PANEL_ID: &str = "params-panel";
const PARAMS_URL: &str = "/params";
const PARAMS_TARGET: &str = "#params-panel";

/// Whether the generate trigger accepts clicks.
pub fn generate_enabled(params: &GenerationParams, loading: bool) -> bool {
    !loading && params.has_subject()
}

/// Parameter form bound to the controller's params.
///
/// The fields are not wrapped in a `<form>`, so htmx posts only the
/// changed field and the server merges it as a partial update.
pub fn params_panel(params: &GenerationParams, loading: bool) -> Markup {
    let toggle_key = json!({ "include_answer_key": !params.include_answer_key }).to_string();

    html! {
        section id=(PARAMS_PANEL_ID) class="card params" {
            h2 { "Customize Paper" }

            div class="grid two" {
                label {
                    "Subject"
                    input type="text" name="subject" value=(params.subject)
                        placeholder="e.g. Physics, World History"
                        hx-post=(PARAMS_URL) hx-trigger="change" hx-target=(PARAMS_TARGET) hx-swap="outerHTML";
                }
                label {
                    "Grade / Level"
                    input type="text" name="grade" value=(params.grade)
                        placeholder="e.g. 10th Grade, Undergraduate"
                        hx-post=(PARAMS_URL) hx-trigger="change" hx-target=(PARAMS_TARGET) hx-swap="outerHTML";
                }
            }

            label {
                "Specific Topics / Chapters"
                textarea name="topics" rows="3"
                    placeholder="e.g. Newton's Laws of Motion, Friction, Gravitation..."
                    hx-post=(PARAMS_URL) hx-trigger="change" hx-target=(PARAMS_TARGET) hx-swap="outerHTML" {
                    (params.topics)
                }
            }

            div class="grid three" {
                label {
                    "Difficulty"
                    select name="difficulty"
                        hx-post=(PARAMS_URL) hx-trigger="change" hx-target=(PARAMS_TARGET) hx-swap="outerHTML" {
                        @for difficulty in Difficulty::ALL {
                            option value=(difficulty.as_str()) selected[difficulty == params.difficulty] {
                                (difficulty.label())
                            }
                        }
                    }
                }
                label {
                    "Number of Questions"
                    input type="number" name="question_count" min="1" max="50"
                        value=(params.question_count)
                        hx-post=(PARAMS_URL) hx-trigger="change" hx-target=(PARAMS_TARGET) hx-swap="outerHTML";
                }
                label class="checkbox" {
                    input type="checkbox" id="ans-key" checked[params.include_answer_key]
                        hx-post=(PARAMS_URL) hx-trigger="change" hx-vals=(toggle_key)
                        hx-target=(PARAMS_TARGET) hx-swap="outerHTML";
                    "Include Answer Key"
                }
            }

            button id="generate-btn" type="button" class="primary"
                hx-post="/generate" hx-target="#workspace" hx-swap="outerHTML"
                hx-indicator="#generating" hx-disabled-elt="this"
                disabled[!generate_enabled(params, loading)] {
                @if loading {
                    "Generating Paper..."
                } @else {
                    "Generate Question Paper"
                }
            }
        }
    }
}
