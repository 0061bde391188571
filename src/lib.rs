pub mod app;
pub mod cli;
pub mod config;
pub mod form;
pub mod persistence;
pub mod ports;
pub mod shell;
pub mod storage;
pub mod store;
pub mod terminal;
pub mod types;
pub mod utils;
