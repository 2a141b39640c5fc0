pub mod app;
pub mod config;
pub mod conversation;
pub mod dispatcher;
pub mod message;
