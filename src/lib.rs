pub mod backend;
pub mod commands;
pub mod config;
pub mod forms;
pub mod logging;
pub mod web;
