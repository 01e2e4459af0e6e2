pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod patcher;
pub mod payload;
pub mod runner;

#[cfg(test)]
mod tests;
