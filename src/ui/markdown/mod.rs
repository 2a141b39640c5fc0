//! Terminal rendering of transcript messages.
//!
//! Bot replies are parsed as markdown with pulldown-cmark and turned into
//! pre-wrapped ratatui lines; user messages are shown verbatim.

mod code;
mod lists;
mod render;
mod table;
mod wrap;


pub use code::CodeBlock;
pub use render::{
    render_message_with_config, MessageRenderConfig, RenderedMessage, BOT_LABEL, USER_PREFIX,
};
pub(crate) use wrap::wrap_spans;
