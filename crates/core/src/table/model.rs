//! Row and column model for the order listing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::RowError;

/// Field carrying the identity of every row.
pub const ID_FIELD: &str = "orderid";

/// Field read by the redesign workflow to classify eligibility.
pub const STATUS_FIELD: &str = "status";

/// A displayed column: the header label and the row field it reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Display label.
    pub header: String,
    /// Field key read from each row.
    pub accessor: String,
}

impl Column {
    pub fn new(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
        }
    }
}

/// Columns shown on the order listing page.
pub fn orders_columns() -> Vec<Column> {
    vec![
        Column::new("Order ID", ID_FIELD),
        Column::new("File Name", "fname"),
        Column::new("Status", STATUS_FIELD),
        Column::new("Customer", "customer"),
        Column::new("Created", "created_at"),
    ]
}

/// Returns the accessors that no row carries at all.
///
/// A column whose field is absent on one row but present on another is fine,
/// that cell just renders empty. A column present on none of the rows is
/// almost certainly a typo in the descriptor list.
pub fn validate_columns(columns: &[Column], rows: &[Row]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    columns
        .iter()
        .filter(|col| !rows.iter().any(|row| row.has_field(&col.accessor)))
        .map(|col| col.accessor.clone())
        .collect()
}

/// One record of the listing.
///
/// An open mapping of field name to scalar value, with the identity field
/// extracted and validated up front. The identity is kept in `fields` as well
/// so columns can display and sort by it like any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Row {
    id: String,
    fields: Map<String, Value>,
}

impl Row {
    /// Builds a row from a field map, extracting the identity field.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, RowError> {
        let id = match fields.get(ID_FIELD) {
            None | Some(Value::Null) => return Err(RowError::MissingId),
            Some(Value::String(s)) if s.trim().is_empty() => return Err(RowError::MissingId),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return Err(RowError::InvalidId(other.to_string())),
        };

        Ok(Self { id, fields })
    }

    /// Builds a row from an id and `(field, value)` pairs.
    pub fn new<I, K>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let id = id.into();
        let mut map: Map<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        map.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        Self { id, fields: map }
    }

    /// The row identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw value of a field, `None` when absent.
    pub fn get(&self, accessor: &str) -> Option<&Value> {
        self.fields.get(accessor)
    }

    pub fn has_field(&self, accessor: &str) -> bool {
        self.fields.contains_key(accessor)
    }

    /// Stringified cell value; missing and null fields render empty.
    pub fn cell_text(&self, accessor: &str) -> String {
        self.get(accessor).map(value_text).unwrap_or_default()
    }

    /// Current workflow status, if the row carries one.
    pub fn status(&self) -> Option<&str> {
        self.get(STATUS_FIELD).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for Row {
    type Error = RowError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

impl From<Row> for Map<String, Value> {
    fn from(row: Row) -> Self {
        row.fields
    }
}

/// Text form of a cell value as the table displays it.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Whether a value counts as missing for sorting purposes.
pub fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}
