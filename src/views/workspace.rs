// src/views/workspace.rs

use maud::{Markup, html};

use crate::models::ParamsUpdate;
use crate::services::controller::PaperController;
use crate::views::{form, layout, preview};

pub const WORKSPACE_ID: &str = "workspace";
const GENERATING_ID: &str = "generating";
const MOBILE_ACTION_ID: &str = "mobile-action";

fn oob(flag: bool) -> Option<&'static str> {
    flag.then_some("true")
}

fn error_banner(message: &str) -> Markup {
    html! {
        div class="alert error" role="alert" { (message) }
    }
}

fn pro_tip() -> Markup {
    html! {
        div class="card tip" {
            h3 { "Pro Tip" }
            p {
                "Be specific about your topics to get more relevant questions. "
                "For example, instead of \"History\", try \"French Revolution 1789-1799\"."
            }
        }
    }
}

fn loading_panel(subject: &str) -> Markup {
    let subject = if subject.trim().is_empty() { "your exam" } else { subject };
    html! {
        div class="loading no-print" {
            div class="spinner" {}
            h2 { "Analyzing Subject Matter..." }
            p { "Curating the best questions for " (subject) }
        }
    }
}

/// Shown by htmx while `/generate` is in flight; its siblings are hidden
/// by the stylesheet for that time.
fn generating_indicator(subject: &str, swap_oob: bool) -> Markup {
    html! {
        div id=(GENERATING_ID) class="htmx-indicator no-print" hx-swap-oob=[oob(swap_oob)] {
            (loading_panel(subject))
        }
    }
}

fn empty_state() -> Markup {
    html! {
        div class="empty no-print" {
            h2 { "Ready to create?" }
            p {
                "Fill out the details on the left and our AI will craft a professional "
                "question paper for you instantly."
            }
        }
    }
}

/// Bottom action for small screens, present until a paper exists.
fn mobile_action(controller: &PaperController, swap_oob: bool) -> Markup {
    let visible = controller.paper().is_none() && !controller.is_loading();

    html! {
        div id=(MOBILE_ACTION_ID) class="mobile-action no-print" hx-swap-oob=[oob(swap_oob)] {
            @if visible {
                button type="button" class="primary"
                    hx-post="/generate" hx-target=(format!("#{WORKSPACE_ID}")) hx-swap="outerHTML"
                    hx-indicator=(format!("#{GENERATING_ID}")) hx-disabled-elt="this"
                    disabled[!controller.can_generate()] {
                    "Create Paper Now"
                }
            }
        }
    }
}

/// Sidebar and content area, swapped as a whole after each generation.
pub fn workspace(controller: &PaperController) -> Markup {
    let params = controller.params();
    let loading = controller.is_loading();

    html! {
        div id=(WORKSPACE_ID) class="workspace" {
            aside class="sidebar no-print" {
                (form::params_panel(params, loading))

                @if let Some(message) = controller.error() {
                    (error_banner(message))
                }

                @if controller.paper().is_none() && !loading {
                    (pro_tip())
                }
            }

            section class="content" {
                (generating_indicator(&params.subject, false))

                @if loading {
                    (loading_panel(&params.subject))
                } @else if let Some(snapshot) = controller.paper() {
                    (preview::paper_preview(&snapshot.paper, params.include_answer_key, false))
                } @else {
                    (empty_state())
                }
            }

            (mobile_action(controller, false))
        }
    }
}

/// Response to a single form field change.
///
/// Always the re-rendered form. Parts of the workspace that depend on the
/// changed field ride along as out-of-band swaps: the indicator and the
/// mobile action for the subject, the preview for the answer key.
pub fn params_refresh(controller: &PaperController, update: &ParamsUpdate) -> Markup {
    let params = controller.params();

    html! {
        (form::params_panel(params, controller.is_loading()))

        @if update.subject.is_some() {
            (generating_indicator(&params.subject, true))
            (mobile_action(controller, true))
        }

        @if update.include_answer_key.is_some() && !controller.is_loading() {
            @if let Some(snapshot) = controller.paper() {
                (preview::paper_preview_oob(&snapshot.paper, params.include_answer_key))
            }
        }
    }
}

/// Full page around the workspace.
pub fn home(controller: &PaperController) -> Markup {
    layout::page("Create Paper", workspace(controller))
}
