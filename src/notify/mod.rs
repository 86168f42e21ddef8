//! Notification module
//!
//! This module delivers change and error notifications, including:
//! - The `Notifier` trait the pipeline reports through
//! - A Telegram Bot API implementation
//! - Message and keyboard rendering
//! - The team flag table

pub mod countries;
mod render;
mod telegram;
mod traits;

pub use render::{
    category_list, change_text, error_text, escape_code, format_match_date, match_keyboard,
    render_table, InlineKeyboardButton, InlineKeyboardMarkup,
};
pub use telegram::TelegramNotifier;
pub use traits::{Notifier, NotifyError, NotifyResult};
