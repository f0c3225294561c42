//! Terminal front-end: CLI, config, logging, remembered task id and rendering.
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod ui;
