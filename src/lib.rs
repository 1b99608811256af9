// src/lib.rs

pub mod api;
pub mod app;
pub mod assistant;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod errors;
pub mod event;
pub mod interpreter;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod prompts;
pub mod settings;
pub mod status_indicator;
pub mod ui;
