// src/display/mod.rs - Terminal presentation

pub mod card;

pub use card::{render_card, render_view, LossSeverity};
