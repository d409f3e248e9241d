//! Clients for external services and the response cache they share

pub mod api;
pub mod cache;
pub mod telegram;

pub use api::ScheduleClient;
pub use cache::ResponseCache;
pub use telegram::TelegramClient;
