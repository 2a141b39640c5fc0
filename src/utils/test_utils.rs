use crate::core::app::{App, AppInitConfig};
use crate::core::message::Message;
use crate::utils::url::DEFAULT_BASE_URL;

pub fn create_test_app() -> App {
    create_test_app_with_base_url(DEFAULT_BASE_URL)
}

pub fn create_test_app_with_base_url(base_url: &str) -> App {
    App::new(AppInitConfig {
        base_url: base_url.to_string(),
        theme: "dark".to_string(),
        markdown: true,
        syntax: true,
        sidebar: true,
    })
}

pub fn create_test_messages() -> Vec<Message> {
    vec![
        Message::user("Hello"),
        Message::bot("Hi there!"),
        Message::user("How are you?"),
        Message::bot("I'm doing well, thank you for asking!"),
    ]
}
