// src/views/layout.rs

use maud::{DOCTYPE, Markup, html};

pub const APP_NAME: &str = "ExamCraft AI";
const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/paper.css";
    }
}

fn js() -> Markup {
    html! {
        script src=(HTMX_SRC) {}
    }
}

fn header() -> Markup {
    html! {
        header."app-header no-print" {
            div."brand" {
                strong { (APP_NAME) }
            }
            span."version" { (env!("CARGO_PKG_VERSION")) }
        }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";

                (css())
                (js())

                title { (format!("{title} - {APP_NAME}")) }
            }

            body {
                (header())
                main { (body) }
            }
        }
    }
}
