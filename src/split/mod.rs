//! Bill splitting between event participants
//!
//! Unrestricted items are shared by everyone. Restricted items (alcoholic
//! drinks, typically) are shared only by the participants who consumed them.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A priced line item, usually read from a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    #[serde(default)]
    pub name: String,
    pub price: f64,
    /// Whether the cost is shared only by flagged participants
    #[serde(default, alias = "alcoholic")]
    pub restricted: bool,
}

impl BillItem {
    pub fn new(name: impl Into<String>, price: f64, restricted: bool) -> Self {
        Self {
            name: name.into(),
            price,
            restricted,
        }
    }
}

/// Errors raised by [`split_bill`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("No participants were given")]
    NoParticipants,

    #[error("Item '{name}' has an invalid price ({price})")]
    InvalidPrice { name: String, price: f64 },
}

impl SplitError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SplitError::NoParticipants => "NO_PARTICIPANTS",
            SplitError::InvalidPrice { .. } => "INVALID_PRICE",
        }
    }
}

/// Result of a bill split, all amounts rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSplit {
    pub grand_total: f64,
    pub restricted_total: f64,
    pub unrestricted_total: f64,
    pub participant_count: usize,
    pub restricted_count: usize,
    /// What every participant pays for unrestricted items
    pub base_share: f64,
    /// What each flagged participant pays on top of the base share
    pub restricted_share: f64,
    /// Restricted cost nobody was flagged for
    pub unallocated_restricted: f64,
    /// Amount owed per participant, in input order
    pub shares: IndexMap<String, f64>,
}

impl BillSplit {
    pub fn share_of(&self, participant: &str) -> Option<f64> {
        self.shares.get(participant).copied()
    }
}

/// Split `items` between `participants`
///
/// Names are trimmed, blank names dropped and duplicates collapsed. Flagged
/// names that are not participants are ignored. When restricted items exist
/// but nobody is flagged, their cost is reported as `unallocated_restricted`.
pub fn split_bill<S: AsRef<str>>(
    items: &[BillItem],
    participants: &[S],
    restricted_participants: &[S],
) -> Result<BillSplit, SplitError> {
    let participants = normalize_names(participants.iter().map(AsRef::as_ref));
    if participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let flagged: IndexSet<&str> = normalize_names(restricted_participants.iter().map(AsRef::as_ref))
        .into_iter()
        .filter(|name| participants.contains(name))
        .collect();

    let mut restricted_total = 0.0;
    let mut unrestricted_total = 0.0;
    for item in items {
        if !item.price.is_finite() {
            return Err(SplitError::InvalidPrice {
                name: item.name.clone(),
                price: item.price,
            });
        }
        if item.restricted {
            restricted_total += item.price;
        } else {
            unrestricted_total += item.price;
        }
    }

    let base_share = unrestricted_total / participants.len() as f64;
    let (restricted_share, unallocated) = if flagged.is_empty() {
        (0.0, restricted_total)
    } else {
        (restricted_total / flagged.len() as f64, 0.0)
    };

    let shares = participants
        .iter()
        .map(|name| {
            let owed = if flagged.contains(name) {
                base_share + restricted_share
            } else {
                base_share
            };
            (name.to_string(), round_cents(owed))
        })
        .collect();

    tracing::debug!(
        participants = participants.len(),
        flagged = flagged.len(),
        total = restricted_total + unrestricted_total,
        "Split bill"
    );

    Ok(BillSplit {
        grand_total: round_cents(restricted_total + unrestricted_total),
        restricted_total: round_cents(restricted_total),
        unrestricted_total: round_cents(unrestricted_total),
        participant_count: participants.len(),
        restricted_count: flagged.len(),
        base_share: round_cents(base_share),
        restricted_share: round_cents(restricted_share),
        unallocated_restricted: round_cents(unallocated),
        shares,
    })
}

/// Parse a comma-separated participant list such as `"Ana, Bia, ,Caio"`
pub fn parse_participants(input: &str) -> Vec<String> {
    normalize_names(input.split(','))
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn normalize_names<'a>(names: impl Iterator<Item = &'a str>) -> IndexSet<&'a str> {
    names.map(str::trim).filter(|name| !name.is_empty()).collect()
}

/// Round half away from zero to two decimals
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
