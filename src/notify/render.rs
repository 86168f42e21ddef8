//! Message rendering
//!
//! Builds the Bot API message text and inline keyboards for change and error
//! notifications, plus a plain text table used when printing snapshots.
//!
//! # Change Notification Layout
//!
//! ```text
//! `Update for match №5`
//! [ France 🇫🇷 ] [ 🇦🇺 Australia ]
//! [ 📅 22-11-2022 22:00          ]
//! [ 🏟 Al Janoub Stadium 🏟       ]
//! [ 🎫 Cat 1, Cat 3              ]  -> ticket page
//! ```

use crate::config::SlotRange;
use crate::model::MatchRecord;
use crate::notify::countries;
use chrono::NaiveDate;
use serde::Serialize;

/// One button of an inline keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            url: Some(url.into()),
        }
    }
}

/// Inline keyboard attached to a message, as rows of buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Escapes text for use inside a MarkdownV2 code entity
///
/// Inside `pre` and `code` only the backtick and the backslash are special.
pub fn escape_code(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '`' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Text of a change notification
pub fn change_text(record: &MatchRecord) -> String {
    format!("`Update for match №{}`", record.match_number)
}

/// Text of an error notification
pub fn error_text(message: &str) -> String {
    format!("```\nTicketWatch got error:\n{}```", escape_code(message))
}

/// Keyboard summarizing a match, with a link to its ticket page
pub fn match_keyboard(record: &MatchRecord, slots: &SlotRange) -> InlineKeyboardMarkup {
    let host = match countries::lookup(&record.host_team) {
        Some(country) => format!("{} {}", record.host_team, country.flag),
        None => record.host_team.clone(),
    };
    let opposing = match countries::lookup(&record.opposing_team) {
        Some(country) => format!("{} {}", country.flag, record.opposing_team),
        None => record.opposing_team.clone(),
    };

    let date = format!(
        "📅 {} {}",
        format_match_date(&record.match_date),
        record.match_time
    );
    let stadium = format!("🏟 {} 🏟", record.stadium);
    let categories = format!("🎫 {}", category_list(record));

    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![
                InlineKeyboardButton::callback(host, "host"),
                InlineKeyboardButton::callback(opposing, "opposing"),
            ],
            vec![InlineKeyboardButton::callback(date, "date")],
            vec![InlineKeyboardButton::callback(stadium, "stadium")],
            vec![InlineKeyboardButton::link(
                categories,
                slots.url_for_match(record.match_number),
            )],
        ],
    }
}

/// Reformats a `Weekday, D Month YYYY` label as `DD-MM-YYYY`
///
/// Labels that do not follow that shape are returned unchanged.
pub fn format_match_date(label: &str) -> String {
    label
        .split_once(", ")
        .and_then(|(_, date)| NaiveDate::parse_from_str(date.trim(), "%d %B %Y").ok())
        .map(|date| date.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Comma separated category names, e.g. `Cat 1, Cat 3`
pub fn category_list(record: &MatchRecord) -> String {
    record
        .available_categories
        .iter()
        .map(|c| format!("Cat {}", c.quality))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a match as a boxed text table followed by its ticket page URL
///
/// ```text
/// +-----------------------------------+
/// |  Game 12 | Senegal vs Netherlands |
/// +-----------------------------------+
/// |  Monday, 21 November 2022 19:00   |
/// +-----------------------------------+
/// |        Al Thumama Stadium         |
/// +-----------------------------------+
/// |           Cat 1, Cat 3            |
/// +-----------------------------------+
/// ```
pub fn render_table(record: &MatchRecord, slots: &SlotRange) -> String {
    let categories = if record.is_available() {
        category_list(record)
    } else {
        "sold out".to_string()
    };

    let rows = [
        format!(
            "Game {} | {} vs {}",
            record.match_number, record.host_team, record.opposing_team
        ),
        format!("{} {}", record.match_date, record.match_time),
        record.stadium.clone(),
        categories,
    ];

    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let line = format!("+{}+\n", "-".repeat(width + 2));

    let mut table = line.clone();
    for row in &rows {
        let diff = width - row.chars().count();
        let left = diff / 2 + 1;
        let right = diff - diff / 2 + 1;
        table.push_str(&format!("|{}{}{}|\n", " ".repeat(left), row, " ".repeat(right)));
        table.push_str(&line);
    }
    table.push_str(&slots.url_for_match(record.match_number));
    table
}
