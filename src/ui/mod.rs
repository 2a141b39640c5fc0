//! Terminal UI layer for the interactive chat client.
//!
//! Key submodules include:
//! - [`chat_loop`]: the event loop that turns terminal input into
//!   [`crate::core::app::AppAction`]s and runs the resulting commands.
//! - [`renderer`], [`layout`] and [`sidebar`]: frame composition.
//! - [`markdown`]: message rendering into pre-wrapped lines, including code
//!   blocks, tables and source citations.
//! - [`theme`]: color and style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the conversation and backend coordination.

pub mod chat_loop;
pub mod layout;
pub mod markdown;
pub mod renderer;
pub mod sidebar;
pub mod theme;
