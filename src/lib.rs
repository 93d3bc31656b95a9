// src/lib.rs
pub mod banner;
pub mod classifier;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod pacing;
pub mod palette;
pub mod preview;
pub mod report;
pub mod surface;
pub mod ui;
