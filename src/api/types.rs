//! Tables API request and response types.
//!
//! These types model the `{ "data": ... }` envelopes returned by the tables
//! API. Items are decoded into ordered column maps so arbitrary extra fields
//! can be displayed without free-form indexing.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the item field holding tags. Never rendered as a column.
pub const TAGS_FIELD: &str = "tags";

/// Response envelope wrapping every successful payload.
///
/// Returned by `GET /tables` as `{ "data": [Table, ...] }` and by the create
/// endpoints as `{ "data": Table }` / `{ "data": Tag }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// The payload.
    pub data: T,
}

/// A named collection of items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Table {
    /// The table ID.
    pub id: i64,
    /// The table title.
    pub title: String,
    /// The rows of this table.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Item>,
}

impl Table {
    /// Get the displayable columns of this table.
    ///
    /// This is the union of the keys of every item, in order of first
    /// appearance, without the `tags` field.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for item in &self.items {
            for (name, _) in item.fields() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.clone());
                }
            }
        }
        columns
    }
}

/// Metadata attached to an item. Not displayed as a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag ID.
    pub id: i64,
    /// The tag title.
    pub title: String,
    /// The tag description.
    #[serde(default)]
    pub description: String,
}

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integral number.
    Integer(i64),
    /// A non-integral number (or one outside the `i64` range).
    Float(f64),
    /// A string. Nested arrays and objects are kept here as compact JSON.
    Text(String),
}

impl CellValue {
    /// Check whether this is a JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Rank of the value kind when comparing values of different kinds.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Integer(_) | CellValue::Float(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::Null => 3,
        }
    }

    /// Total order between two cell values.
    ///
    /// Numbers compare numerically (integers against floats too), strings by
    /// code point, `false < true`. Different kinds order as
    /// bool < number < text < null.
    pub fn total_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => cmp_floats(*a, *b),
            (CellValue::Integer(a), CellValue::Float(b)) => cmp_int_float(*a, *b),
            (CellValue::Float(a), CellValue::Integer(b)) => cmp_int_float(*b, *a).reverse(),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`. NaN sorts by sign beyond every number.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float above every i64.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= I64_END {
        return Ordering::Less;
    }
    if float < -I64_END {
        return Ordering::Greater;
    }

    // In range, so the truncated float converts to i64 exactly.
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&float).unwrap_or(Ordering::Equal),
        other => other,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s),
            nested => CellValue::Text(nested.to_string()),
        }
    }
}

/// One row of displayable data.
///
/// `fields` keeps every non-tag key of the wire object in wire order,
/// including `id` and `title`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Item {
    id: i64,
    title: String,
    tags: Vec<Tag>,
    fields: Vec<(String, CellValue)>,
}

impl Item {
    /// Build an item from ordered `(column, value)` pairs.
    ///
    /// Used by tests and callers that construct rows by hand; `id` and
    /// `title` are prepended as columns.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        extra: impl IntoIterator<Item = (String, CellValue)>,
    ) -> Self {
        let title = title.into();
        let mut fields = vec![
            ("id".to_string(), CellValue::Integer(id)),
            ("title".to_string(), CellValue::Text(title.clone())),
        ];
        fields.extend(extra);
        Self {
            id,
            title,
            tags: Vec::new(),
            fields,
        }
    }

    /// Attach tags to this item.
    #[cfg(test)]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// The item ID, unique within its table.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The item title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tags attached to this item.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Visible fields in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k, v))
    }

    /// Look up a visible column. `None` when this item has no such key.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

impl TryFrom<Map<String, Value>> for Item {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = map
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| "item is missing an integer `id`".to_string())?;
        let title = map
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| format!("item {} is missing a string `title`", id))?;

        let mut tags = Vec::new();
        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            if key == TAGS_FIELD {
                if !value.is_null() {
                    tags = serde_json::from_value(value)
                        .map_err(|e| format!("item {}: invalid tags: {}", id, e))?;
                }
            } else {
                fields.push((key, CellValue::from(value)));
            }
        }

        Ok(Self {
            id,
            title,
            tags,
            fields,
        })
    }
}

/// Request body for `POST /tables`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTableRequest<'a> {
    pub title: &'a str,
}

/// Request body for `POST /tags`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
