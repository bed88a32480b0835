//! Types exchanged with the order backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status string the backend uses for an accepted state change.
pub const SUCCESS_STATUS: &str = "success";

/// Answer to a state-change submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// `"success"` or any other backend-defined status.
    pub status: String,
    /// Human-readable detail; used as the failure reason.
    #[serde(default)]
    pub message: String,
}

impl SubmitResponse {
    pub fn success() -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            message: String::new(),
        }
    }

    pub fn rejected(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Request body of a redesign submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedesignRequestBody {
    pub message: String,
}

/// Answer to a download target lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadTargetResponse {
    #[serde(default)]
    pub path: Option<String>,
}

/// File variants an order can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportVariant {
    /// The file the customer uploaded.
    Original,
    /// Work-in-progress file from the design team.
    Intermediate,
    /// The delivered file.
    Finished,
    /// Printable mesh.
    Stl,
}

impl ExportVariant {
    pub const ALL: [ExportVariant; 4] = [
        ExportVariant::Original,
        ExportVariant::Intermediate,
        ExportVariant::Finished,
        ExportVariant::Stl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Intermediate => "intermediate",
            Self::Finished => "finished",
            Self::Stl => "stl",
        }
    }

    /// Row field holding this variant's file path.
    pub fn path_field(self) -> &'static str {
        match self {
            Self::Original => "original_path",
            Self::Intermediate => "intermediate_path",
            Self::Finished => "finished_path",
            Self::Stl => "stl_path",
        }
    }
}

impl fmt::Display for ExportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for ExportVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
