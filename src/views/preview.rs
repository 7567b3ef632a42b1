// src/views/preview.rs

use maud::{Markup, html};

use crate::models::{Question, QuestionPaper, QuestionType};

pub const PREVIEW_ID: &str = "paper-preview";

/// Letter shown next to the option at `index` (A, B, C, ...).
pub fn option_label(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32('A' as u32 + i))
        .unwrap_or('?')
}

fn editable(editing: bool) -> Option<&'static str> {
    editing.then_some("true")
}

fn toolbar(editing: bool) -> Markup {
    html! {
        div class="toolbar no-print" {
            h3 { "Preview Paper" }
            div class="actions" {
                button type="button" class="secondary"
                    hx-get=(format!("/paper?editing={}", !editing))
                    hx-target=(format!("#{PREVIEW_ID}")) hx-swap="outerHTML" {
                    @if editing { "Finish Editing" } @else { "Edit Mode" }
                }
                button type="button" class="primary" onclick="window.print()" {
                    "Print / PDF"
                }
            }
        }
    }
}

fn paper_header(paper: &QuestionPaper, editing: bool) -> Markup {
    html! {
        div class="paper-header" {
            h1 contenteditable=[editable(editing)] { (paper.title) }
            div class="meta" {
                span contenteditable=[editable(editing)] { "Subject: " (paper.subject) }
                span contenteditable=[editable(editing)] { "Grade: " (paper.grade) }
                span contenteditable=[editable(editing)] { "Duration: " (paper.duration) }
                span contenteditable=[editable(editing)] { "Total Marks: " (paper.total_marks) }
            }
        }
        div class="candidate" {
            div { "NAME: _____________________________" }
            div { "ROLL NO: ___________" }
        }
    }
}

fn instructions(paper: &QuestionPaper, editing: bool) -> Markup {
    html! {
        div class="instructions" {
            h4 { "General Instructions:" }
            ul {
                @for inst in &paper.instructions {
                    li contenteditable=[editable(editing)] { (inst) }
                }
            }
        }
    }
}

/// Type-specific affordance rendered under a question.
fn affordance(question: &Question, editing: bool) -> Markup {
    html! {
        @match question.question_type {
            QuestionType::Mcq => {
                @if let Some(options) = question.mcq_options() {
                    ol class="options" {
                        @for (idx, opt) in options.iter().enumerate() {
                            li class="option" {
                                span class="option-label" { (option_label(idx)) }
                                span contenteditable=[editable(editing)] { (opt) }
                            }
                        }
                    }
                }
            }
            QuestionType::TrueFalse => {
                div class="hint" { "(True / False)" }
            }
            QuestionType::ShortAnswer | QuestionType::LongAnswer => {
                div class="answer-space" {}
            }
            QuestionType::FillInBlanks => {}
        }
    }
}

fn question_block(number: usize, question: &Question, editing: bool) -> Markup {
    html! {
        div class="question" data-id=(question.id) {
            div class="question-line" {
                span class="number" { "Q" (number) "." }
                div class="text" contenteditable=[editable(editing)] { (question.text) }
                span class="marks" { "(" (question.marks) " Marks)" }
            }
            (affordance(question, editing))
        }
    }
}

/// Confidential answers, only visible in print output.
fn answer_key(paper: &QuestionPaper) -> Markup {
    html! {
        div class="answer-key print-only" {
            h2 { "Answer Key (CONFIDENTIAL)" }
            div class="answers" {
                @for (index, q) in paper.questions.iter().enumerate() {
                    div class="answer" {
                        span class="number" { "Q" (index + 1) ":" }
                        span { strong { "Answer:" } " " (q.answer) }
                    }
                }
            }
        }
    }
}

/// Printable rendering of `paper`.
///
/// With `editing` set every text node becomes `contenteditable`. Changes
/// made that way live only in the browser and are gone on the next render.
pub fn paper_preview(paper: &QuestionPaper, show_answer_key: bool, editing: bool) -> Markup {
    render(paper, show_answer_key, editing, false)
}

/// Read-only preview marked for an htmx out-of-band swap, so it can ride
/// along with another fragment and replace the preview already on the page.
pub fn paper_preview_oob(paper: &QuestionPaper, show_answer_key: bool) -> Markup {
    render(paper, show_answer_key, false, true)
}

fn render(paper: &QuestionPaper, show_answer_key: bool, editing: bool, oob: bool) -> Markup {
    html! {
        div id=(PREVIEW_ID) class="preview" hx-swap-oob=[oob.then_some("true")] {
            (toolbar(editing))

            article class="paper" {
                (paper_header(paper, editing))
                (instructions(paper, editing))

                div class="questions" {
                    @for (index, q) in paper.questions.iter().enumerate() {
                        (question_block(index + 1, q, editing))
                    }
                }

                div class="paper-footer" { "--- End of Question Paper ---" }
            }

            @if show_answer_key {
                (answer_key(paper))
            }
        }
    }
}
