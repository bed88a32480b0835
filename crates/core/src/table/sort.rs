//! Column sorting with a three-state click cycle.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{is_missing, value_text, Row};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Which column the listing is sorted by, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// `None` keeps the original row order.
    pub key: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Desc,
        }
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// State after a header click on `key`.
    ///
    /// Cycles ascending -> descending -> unsorted for the same column; a click
    /// on any other column starts over at ascending.
    pub fn clicked(&self, key: &str) -> Self {
        match (&self.key, self.direction) {
            (Some(current), SortDirection::Asc) if current == key => Self::descending(key),
            (Some(current), SortDirection::Desc) if current == key => Self::none(),
            _ => Self::ascending(key),
        }
    }
}

/// Orders `rows` by `sort`, returning a new sequence.
///
/// Each cell is read into a sort key once, then the keys are sorted. The
/// sort is stable, so rows comparing equal keep their relative order.
pub fn sort_rows<'a>(rows: Vec<&'a Row>, sort: &SortState) -> Vec<&'a Row> {
    let Some(key) = sort.key.as_deref() else {
        return rows;
    };

    let mut keyed: Vec<(SortKey, &'a Row)> = rows
        .into_iter()
        .map(|row| (SortKey::of(row.get(key)), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.compare(b, sort.direction));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Compares two cell values under the listing's sort policy.
///
/// Missing values go last whatever the direction. Numeric values come before
/// text in ascending order and compare numerically among themselves; text
/// compares with [`collate`].
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    SortKey::of(a).compare(&SortKey::of(b), direction)
}

/// Sortable reading of one cell.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        match value {
            Some(v) if !is_missing(value) => match as_number(v) {
                Some(n) => Self::Number(n),
                None => Self::Text(value_text(v)),
            },
            _ => Self::Missing,
        }
    }

    fn compare(&self, other: &Self, direction: SortDirection) -> Ordering {
        use SortKey::*;

        let ordering = match (self, other) {
            (Missing, Missing) => return Ordering::Equal,
            (Missing, _) => return Ordering::Greater,
            (_, Missing) => return Ordering::Less,
            (Number(x), Number(y)) => x.total_cmp(y),
            (Text(x), Text(y)) => collate(x, y),
            (Number(_), Text(_)) => Ordering::Less,
            (Text(_), Number(_)) => Ordering::Greater,
        };
        direction.apply(ordering)
    }
}

/// Numeric reading of a value: numbers, and strings that parse as a finite number.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Dictionary-style string ordering.
///
/// Letters compare case-blind first, so "apple" < "Banana" < "cherry"; when
/// two strings differ only in case, lowercase sorts first. Remaining ties fall
/// back to code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn case_rank(c: char) -> u8 {
    if c.is_lowercase() {
        0
    } else if c.is_uppercase() {
        1
    } else {
        2
    }
}
