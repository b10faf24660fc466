pub mod api_connection;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod generator;
pub mod memo;
pub mod normalize;
pub mod prompt;
pub mod recipe_parser;
pub mod render;
pub mod selection;
pub mod session;
