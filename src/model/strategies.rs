//! proptest strategies for generated batches

use crate::model::{Batch, MatchRecord, TicketCategory};
use proptest::prelude::*;

/// Free text mixing non-ASCII and MarkdownV2 special characters
fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z ]{0,12}",
        "[_*\\[\\]()~`>#+=|{}.!\\\\-]{1,8}",
        Just("Côte d'Ivoire 🇨🇮".to_string()),
        Just("Korea Republic".to_string()),
    ]
}

/// Categories with small tiers, so repeats are common, and prices over the
/// full `u64` range
pub fn arb_categories() -> impl Strategy<Value = Vec<TicketCategory>> {
    prop::collection::vec(
        (1..5u32, any::<u64>()).prop_map(|(quality, price)| TicketCategory::new(quality, price)),
        0..6,
    )
}

pub fn arb_record() -> impl Strategy<Value = MatchRecord> {
    (
        any::<u32>(),
        arb_label(),
        arb_label(),
        arb_label(),
        arb_label(),
        arb_label(),
        arb_categories(),
    )
        .prop_map(
            |(
                match_number,
                host_team,
                opposing_team,
                match_date,
                match_time,
                stadium,
                available_categories,
            )| MatchRecord {
                match_number,
                host_team,
                opposing_team,
                match_date,
                match_time,
                stadium,
                available_categories,
            },
        )
}

pub fn arb_batch() -> impl Strategy<Value = Batch> {
    prop::collection::vec(arb_record(), 0..12).prop_map(Batch::from)
}
