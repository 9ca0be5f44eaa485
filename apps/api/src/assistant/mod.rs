// In-app help assistant. Free-text chat over a static system prompt.

pub mod chat;
pub mod handlers;
pub mod prompts;
