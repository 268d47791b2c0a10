pub mod action;
pub mod config;
pub mod generate;
pub mod prompt;
