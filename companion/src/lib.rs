pub mod app;
pub mod config;
pub mod consts;
pub mod db;
pub mod errors;
pub mod host;
pub mod ui;
