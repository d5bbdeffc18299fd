pub mod app;
pub mod client;
pub mod commands;
pub mod config;
pub mod counter;
pub mod dataset;
pub mod error;
pub mod excel;
pub mod export;
pub mod layout;
pub mod logging;
pub mod rows;
pub mod server;
pub mod table;
pub mod ui;
pub mod utils;
