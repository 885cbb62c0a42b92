pub mod annotate;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod interaction;
pub mod render;
pub mod repl;
pub mod scanner;
pub mod session;
pub mod upload;
