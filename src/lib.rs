pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod confirm;
pub mod error;
pub mod event;
pub mod help;
pub mod keybindings;
pub mod lifecycle;
pub mod list_view_state;
pub mod localization;
pub mod logging;
pub mod navigation;
pub mod persistence;
pub mod presenter;
pub mod record;
pub mod search;
pub mod store;
pub mod ui;
pub mod version;

shadow_rs::shadow!(build);
