// docnav - interaction state for keyboard-driven listings and document explorers

pub mod app;
pub mod config;
pub mod explorer;
pub mod listing;
pub mod logging;
pub mod ui;
