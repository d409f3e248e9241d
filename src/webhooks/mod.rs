//! Telegram webhook transport

mod server;

pub use server::{router, start_server, WebhookState};
