//! Match page extraction
//!
//! Turns the markup of a single match page into a [`MatchRecord`]. Every
//! element the listing schema requires must be present; a missing element or
//! a malformed number is an [`ExtractionError`], never a silent default.
//!
//! # Page Schema
//!
//! | Field | Selector |
//! |-------|----------|
//! | match number | second token of `.round` |
//! | host team | `.team.host` |
//! | opposing team | `.team.opposing` |
//! | date | `.day` |
//! | time | `.time` |
//! | stadium | `.site` inside `.location` |
//! | categories | `[class*=seat_category_end]` rows |

use crate::model::{MatchRecord, TicketCategory};
use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};

/// Tariff label of rows carrying a real ticket price
const TICKET_PRICE_TARIFF: &str = "Ticket Price";

/// Extracts a match record from raw page markup
///
/// # Arguments
///
/// * `raw` - The page body as returned by the server
///
/// # Returns
///
/// * `Ok(MatchRecord)` - All required fields were found
/// * `Err(ExtractionError)` - A required element is missing or malformed
///
/// # Example
///
/// ```
/// use ticket_watch::crawler::extract_match;
///
/// let html = r#"
///     <div class="round">Match 5</div>
///     <div class="team host">France</div>
///     <div class="team opposing">Australia</div>
///     <div class="day">Tuesday, 22 November 2022</div>
///     <div class="time">22:00</div>
///     <div class="location"><span class="site">Al Janoub Stadium</span></div>
/// "#;
/// let record = extract_match(html.as_bytes()).unwrap();
/// assert_eq!(record.match_number, 5);
/// assert!(!record.is_available());
/// ```
pub fn extract_match(raw: &[u8]) -> Result<MatchRecord, ExtractionError> {
    let html = String::from_utf8_lossy(raw);
    let document = Html::parse_document(&html);
    let root = document.root_element();

    let round = required_text(&root, ".round", "round")?;
    let match_number = parse_second_token(&round, "round")?;

    let host_team = required_text(&root, ".team.host", "host team")?;
    let opposing_team = required_text(&root, ".team.opposing", "opposing team")?;
    let match_date = required_text(&root, ".day", "day")?;
    let match_time = required_text(&root, ".time", "time")?;

    let location = select_first(&root, ".location", "location")?;
    let stadium = required_text(&location, ".site", "site")?;

    let available_categories = extract_categories(&root)?;

    Ok(MatchRecord {
        match_number,
        host_team,
        opposing_team,
        match_date,
        match_time,
        stadium,
        available_categories,
    })
}

/// Extracts the categories currently on sale, in document order
///
/// Rows whose category carries the sold-out overlay are skipped, as are rows
/// whose tariff is not a plain ticket price.
fn extract_categories(root: &ElementRef) -> Result<Vec<TicketCategory>, ExtractionError> {
    let rows = selector("[class*=seat_category_end]")?;
    let overlay = selector("[class=category_unavailable_overlay]")?;

    let mut categories = Vec::new();

    for row in root.select(&rows) {
        let category = select_first(&row, "[class*=category]", "category")?;

        if category.select(&overlay).next().is_some() {
            continue;
        }

        let tariff = required_text(&row, "[class*=tariff]", "tariff")?;
        if tariff != TICKET_PRICE_TARIFF {
            continue;
        }

        let quality = parse_second_token(&text_of(&category), "category")?;
        let price_text = required_text(&row, ".int_part", "int_part")?;
        let price = price_text
            .parse::<u64>()
            .map_err(|_| ExtractionError::InvalidNumber {
                field: "int_part",
                value: price_text.clone(),
            })?;

        categories.push(TicketCategory { quality, price });
    }

    Ok(categories)
}

fn selector(css: &'static str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|_| ExtractionError::InvalidSelector(css))
}

/// Returns the first descendant of `scope` matching `css`
fn select_first<'a>(
    scope: &ElementRef<'a>,
    css: &'static str,
    name: &'static str,
) -> Result<ElementRef<'a>, ExtractionError> {
    let sel = selector(css)?;
    scope
        .select(&sel)
        .next()
        .ok_or(ExtractionError::MissingElement(name))
}

/// Returns the trimmed text of the first descendant matching `css`
fn required_text(
    scope: &ElementRef,
    css: &'static str,
    name: &'static str,
) -> Result<String, ExtractionError> {
    select_first(scope, css, name).map(|element| text_of(&element))
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses the token after the first word, e.g. `5` in "Match 5"
fn parse_second_token(text: &str, field: &'static str) -> Result<u32, ExtractionError> {
    let token = text
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ExtractionError::InvalidNumber {
            field,
            value: text.to_string(),
        })?;

    token.parse().map_err(|_| ExtractionError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}
