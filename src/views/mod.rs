// src/views/mod.rs

pub mod form;
pub mod layout;
pub mod preview;
pub mod workspace;
