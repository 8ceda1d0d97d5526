//! Toml parser for card blocks.
//!
//! # Format
//! ```toml
//! [basic.borrowing]
//! front = "How many mutable borrows may coexist?"
//! back = "One."
//! tags = ["rust"]
//!
//! [reversed_optional.ferris]
//! front = "Ferris"
//! back = "The Rust mascot"
//! ```
//!
//! Top-level keys name the card model, nested keys are the card uids.

use crate::error::{ParseError, Result};
use crate::types::{CardModel, CardRecord};
use serde::Deserialize;
use std::collections::HashSet;
use toml::{Table, Value};

/// Fields of a single card entry.
#[derive(Debug, Deserialize)]
struct CardBody {
    front: String,
    back: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a toml block into card records, in declaration order.
pub fn parse(content: &str) -> Result<Vec<CardRecord>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let table: Table =
        toml::from_str(content).map_err(|e| ParseError::MalformedSyntax(e.to_string()))?;

    let mut cards = Vec::new();
    let mut seen_uids = HashSet::new();

    for (key, group) in table {
        let model =
            CardModel::from_key(&key).ok_or_else(|| ParseError::InvalidModel(key.clone()))?;

        let Value::Table(entries) = group else {
            return Err(invalid(&key, "", "expected a table of cards"));
        };

        for (uid, body) in entries {
            let card = build_card(&key, model, uid, body)?;
            if !seen_uids.insert(card.uid.clone()) {
                return Err(ParseError::DuplicateUid(card.uid));
            }
            cards.push(card);
        }
    }

    Ok(cards)
}

fn build_card(key: &str, model: CardModel, uid: String, body: Value) -> Result<CardRecord> {
    validate_uid(key, &uid)?;

    if !body.is_table() {
        return Err(invalid(key, &uid, "expected a table with `front` and `back`"));
    }

    let body: CardBody = body
        .try_into()
        .map_err(|e: toml::de::Error| invalid(key, &uid, &e.to_string()))?;

    if body.front.trim().is_empty() {
        return Err(invalid(key, &uid, "`front` is empty"));
    }
    if body.back.trim().is_empty() {
        return Err(invalid(key, &uid, "`back` is empty"));
    }

    Ok(CardRecord {
        model,
        uid,
        front: body.front,
        back: body.back,
        tags: body.tags,
    })
}

/// Uids are stored one per trimmed line in the ledger.
fn validate_uid(key: &str, uid: &str) -> Result<()> {
    if uid.is_empty() {
        return Err(invalid(key, uid, "uid is empty"));
    }
    if uid.trim() != uid {
        return Err(invalid(key, uid, "uid has surrounding whitespace"));
    }
    if uid.contains(['\n', '\r']) {
        return Err(invalid(key, uid, "uid contains a line break"));
    }
    Ok(())
}

fn invalid(key: &str, uid: &str, reason: &str) -> ParseError {
    ParseError::InvalidCard {
        model: key.to_string(),
        uid: uid.to_string(),
        reason: reason.to_string(),
    }
}
