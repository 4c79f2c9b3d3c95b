// Fixed field contract for ad-performance tables

use serde::{Deserialize, Serialize};

/// Semantic type of a contract field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Numeric,
    Timestamp,
}

/// Contract field names
pub mod field {
    pub const CAMPAIGN_NAME: &str = "campaign_name";
    pub const ADSET_NAME: &str = "adset_name";
    pub const DATE: &str = "date";
    pub const SPEND: &str = "spend";
    pub const IMPRESSIONS: &str = "impressions";
    pub const CLICKS: &str = "clicks";
    pub const CTR: &str = "ctr";
    pub const PURCHASES: &str = "purchases";
    pub const REVENUE: &str = "revenue";
    pub const ROAS: &str = "roas";
    pub const CREATIVE_TYPE: &str = "creative_type";
    pub const CREATIVE_MESSAGE: &str = "creative_message";
    pub const AUDIENCE_TYPE: &str = "audience_type";
    pub const PLATFORM: &str = "platform";
    pub const COUNTRY: &str = "country";
}

/// All contract fields in canonical order
pub const CONTRACT_FIELDS: [(&str, FieldKind); 15] = [
    (field::CAMPAIGN_NAME, FieldKind::String),
    (field::ADSET_NAME, FieldKind::String),
    (field::DATE, FieldKind::Timestamp),
    (field::SPEND, FieldKind::Numeric),
    (field::IMPRESSIONS, FieldKind::Numeric),
    (field::CLICKS, FieldKind::Numeric),
    (field::CTR, FieldKind::Numeric),
    (field::PURCHASES, FieldKind::Numeric),
    (field::REVENUE, FieldKind::Numeric),
    (field::ROAS, FieldKind::Numeric),
    (field::CREATIVE_TYPE, FieldKind::String),
    (field::CREATIVE_MESSAGE, FieldKind::String),
    (field::AUDIENCE_TYPE, FieldKind::String),
    (field::PLATFORM, FieldKind::String),
    (field::COUNTRY, FieldKind::String),
];

/// The ad-performance schema contract
///
/// Known at compile time; there is no runtime registration of fields.
///
/// # Example
/// ```
/// use adsight::schema::{FieldKind, SchemaContract};
///
/// let contract = SchemaContract;
/// assert_eq!(contract.len(), 15);
/// assert_eq!(contract.kind_of("spend"), Some(FieldKind::Numeric));
/// assert_eq!(contract.kind_of("Spend"), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaContract;

impl SchemaContract {
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldKind)> {
        CONTRACT_FIELDS.iter().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        CONTRACT_FIELDS.iter().map(|(name, _)| *name)
    }

    /// Exact-name lookup of a field's kind
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        CONTRACT_FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, kind)| *kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        CONTRACT_FIELDS.len()
    }

    pub fn is_empty(&self) -> bool {
        CONTRACT_FIELDS.is_empty()
    }

    /// The single timestamp field of the contract
    pub fn timestamp_field(&self) -> &'static str {
        field::DATE
    }
}
