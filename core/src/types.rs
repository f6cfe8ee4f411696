//! Domain DTOs for the bar API.
//!
//! # Design
//! `BarRecord` is what the server hands back: it always carries an `id`.
//! `BarDraft` is the same shape without an `id`, used both as the create
//! payload and as the new-record working copy in the manager. Keeping the two
//! apart means a record being composed can never be mistaken for one the
//! server already knows about.
//!
//! Numeric fields are `Option` because the form accepts free text: a value
//! that does not parse is stored as `None` and goes over the wire as `null`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier. The client never generates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarId(pub i64);

impl fmt::Display for BarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single bar run as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarRecord {
    pub id: BarId,
    pub machine_id: String,
    pub lot_id: String,
    pub product_id: String,
    pub recipe_id: String,
    pub bar_count: Option<i64>,
    pub time_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl BarRecord {
    /// The editable fields of this record, without its `id`.
    pub fn to_draft(&self) -> BarDraft {
        BarDraft {
            machine_id: self.machine_id.clone(),
            lot_id: self.lot_id.clone(),
            product_id: self.product_id.clone(),
            recipe_id: self.recipe_id.clone(),
            bar_count: self.bar_count,
            time_duration: self.time_duration,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// Request payload for creating a bar; also the new-record working copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarDraft {
    pub machine_id: String,
    pub lot_id: String,
    pub product_id: String,
    pub recipe_id: String,
    pub bar_count: Option<i64>,
    pub time_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Default for BarDraft {
    /// Illustrative values shown the first time the create dialog opens.
    fn default() -> Self {
        Self {
            machine_id: "MACHINE1".to_string(),
            lot_id: "LOT123".to_string(),
            product_id: "PRODUCT1".to_string(),
            recipe_id: "RECIPE1".to_string(),
            bar_count: Some(10),
            time_duration: Some(30.5),
            start_time: None,
            end_time: None,
        }
    }
}

/// One editable attribute of a bar, as bound to a form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarField {
    MachineId,
    LotId,
    ProductId,
    RecipeId,
    BarCount,
    TimeDuration,
}

impl BarField {
    pub const ALL: [BarField; 6] = [
        BarField::MachineId,
        BarField::LotId,
        BarField::ProductId,
        BarField::RecipeId,
        BarField::BarCount,
        BarField::TimeDuration,
    ];

    /// Human-readable label used for column headers and form inputs.
    pub fn label(self) -> &'static str {
        match self {
            BarField::MachineId => "Machine ID",
            BarField::LotId => "Lot ID",
            BarField::ProductId => "Product ID",
            BarField::RecipeId => "Recipe ID",
            BarField::BarCount => "Bar Count",
            BarField::TimeDuration => "Time Duration",
        }
    }

    /// Wire name of the field, e.g. `bar_count`.
    pub fn key(self) -> &'static str {
        match self {
            BarField::MachineId => "machine_id",
            BarField::LotId => "lot_id",
            BarField::ProductId => "product_id",
            BarField::RecipeId => "recipe_id",
            BarField::BarCount => "bar_count",
            BarField::TimeDuration => "time_duration",
        }
    }

    pub fn from_key(key: &str) -> Option<BarField> {
        BarField::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Write access to the editable attributes shared by records and drafts.
pub trait BarFields {
    fn set_field(&mut self, field: BarField, raw: &str);
    fn field_text(&self, field: BarField) -> String;
}

macro_rules! impl_bar_fields {
    ($ty:ty) => {
        impl BarFields for $ty {
            fn set_field(&mut self, field: BarField, raw: &str) {
                match field {
                    BarField::MachineId => self.machine_id = raw.to_string(),
                    BarField::LotId => self.lot_id = raw.to_string(),
                    BarField::ProductId => self.product_id = raw.to_string(),
                    BarField::RecipeId => self.recipe_id = raw.to_string(),
                    BarField::BarCount => self.bar_count = parse_int_prefix(raw),
                    BarField::TimeDuration => self.time_duration = parse_float_prefix(raw),
                }
            }

            fn field_text(&self, field: BarField) -> String {
                match field {
                    BarField::MachineId => self.machine_id.clone(),
                    BarField::LotId => self.lot_id.clone(),
                    BarField::ProductId => self.product_id.clone(),
                    BarField::RecipeId => self.recipe_id.clone(),
                    BarField::BarCount => number_text(self.bar_count),
                    BarField::TimeDuration => number_text(self.time_duration),
                }
            }
        }
    };
}

impl_bar_fields!(BarRecord);
impl_bar_fields!(BarDraft);

fn number_text<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

/// Split off an optional sign plus leading ASCII digits.
fn signed_digits(s: &str) -> &str {
    let sign = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    &s[..sign + digits]
}

/// Integer coercion: the longest leading integer, so `"12abc"` is 12 and
/// `"7.9"` is 7. Runs too long for `i64` saturate. `None` when there is no
/// leading digit.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let digits = signed_digits(raw.trim_start());
    if !digits.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(if digits.starts_with('-') { i64::MIN } else { i64::MAX }))
}

/// Float coercion: the longest leading decimal literal. `None` when nothing
/// parses or the result is not finite.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = signed_digits(s).len();
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        end += bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp = signed_digits(&s[end + 1..]);
        if exp.bytes().any(|b| b.is_ascii_digit()) {
            end += 1 + exp.len();
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
