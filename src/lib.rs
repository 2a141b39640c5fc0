//! copilot-chat is a full-screen terminal client for a personal AI copilot
//! backend that answers questions with optional source citations.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation, the query dispatcher and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop.
//! - [`api`] defines the request and response payloads of the query endpoint.
//! - [`utils`] holds URL handling, syntax highlighting, clipboard access and
//!   logging setup.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
