use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type ProductId = RecordId;
pub type CategoryId = RecordId;

/// Identifier assigned by the collection service. Services hand out plain
/// numbers (`17`) or opaque strings (`"a1b2"`), and older records hold numbers
/// written as strings (`"17"`). Ids compare by their text, so `17` and `"17"`
/// name the same record, and each id is written back in the shape it was read.
#[derive(Debug, Clone)]
pub struct RecordId {
    text: String,
    numeric: bool,
}

impl RecordId {
    pub fn number(value: u64) -> Self {
        Self {
            text: value.to_string(),
            numeric: true,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: value.into(),
            numeric: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Numeric value, for ids that are numbers or numeric strings.
    pub fn as_number(&self) -> Option<u64> {
        self.text.parse().ok()
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number().filter(|_| self.numeric) {
            Some(value) => serializer.serialize_u64(value),
            None => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IdRepr {
            Number(u64),
            Text(String),
        }

        Ok(match IdRepr::deserialize(deserializer)? {
            IdRepr::Number(value) => RecordId::number(value),
            IdRepr::Text(text) => RecordId::text(text),
        })
    }
}

/// Rendered in place of a category name when a product points at a category
/// the store does not know about.
pub const UNKNOWN_CATEGORY: &str = "N/A";

/// A clothing item as stored by the collection service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    /// `DD/MM/YYYY`, kept exactly as entered.
    pub import_date: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub quantity: u32,
    pub category_id: CategoryId,
}

/// Body of a create request. The service assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub import_date: String,
    pub quantity: u32,
    pub category_id: CategoryId,
}

impl NewProduct {
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            code: self.code,
            name: self.name,
            import_date: self.import_date,
            quantity: self.quantity,
            category_id: self.category_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Quantities written by older form-based clients arrive as strings
/// (`"quantity": "5"`), so reads accept both representations.
mod lenient {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntegerRepr {
        Number(u64),
        Text(String),
    }

    pub(super) fn integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let raw = match IntegerRepr::deserialize(deserializer)? {
            IntegerRepr::Number(value) => value,
            IntegerRepr::Text(text) => text.trim().parse::<u64>().map_err(|_| {
                D::Error::invalid_value(Unexpected::Str(&text), &"an unsigned integer")
            })?,
        };

        T::try_from(raw)
            .map_err(|_| D::Error::invalid_value(Unexpected::Unsigned(raw), &"an integer in range"))
    }
}
