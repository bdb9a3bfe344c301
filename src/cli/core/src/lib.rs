/* src/cli/core/src/lib.rs */

// Production build orchestrator for SeamJS projects. The binary in main.rs
// is a thin clap front end over `build::ProdBuilder`.

pub mod build;
pub mod config;
mod shell;
pub mod ui;
