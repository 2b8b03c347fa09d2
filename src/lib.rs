// lib.rs - Library root for the codegenie editor

pub mod app;
pub mod buffer;
pub mod cli;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod config_discovery;
pub mod engine;
pub mod history;
pub mod keymap;
pub mod mode;
pub mod problem;
pub mod proxy;
pub mod ui;
pub mod viewport;
