//! ReSchedule - two-week university timetable bot
//!
//! This crate provides both the Telegram bot binary and the reusable pieces
//! behind it: schedule resolution, the cached timetable API client and the
//! chat-state store.

pub mod bot;
pub mod config;
pub mod db;
pub mod error;
pub mod modules;
pub mod schedule;
pub mod services;
pub mod webhooks;

pub use config::Config;
pub use db::{ChatStore, Database};
