//! Terminal front-end: a menu and a heads-up table driven by a `GameSession`.

pub mod app;
pub mod controller;
mod ui;
