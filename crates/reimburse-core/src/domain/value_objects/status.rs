//! Receipt status value objects.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Review state of a receipt.
///
/// A receipt starts as `UnderReview` and leaves that state only through the
/// approval transition, which moves it to `Approved` or `Rejected`. Other
/// values written to the column by newer workflows are carried through as
/// [`ReceiptStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum ReceiptStatus {
    /// Submitted and waiting for an admin.
    #[default]
    UnderReview,
    /// Accepted by an admin; funds transferred.
    Approved,
    /// Declined by an admin.
    Rejected,
    /// Stored text outside the known set, kept verbatim.
    Other(String),
}

impl ReceiptStatus {
    /// Maps column text to a status. Known values match case-insensitively.
    #[must_use]
    pub fn from_column(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "under_review" => Self::UnderReview,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns the value stored in the `status` column.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Other(value) => value,
        }
    }

    /// Checks whether an admin has already acted on the receipt.
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// The statuses this crate writes.
    #[must_use]
    pub fn known() -> [Self; 3] {
        [Self::UnderReview, Self::Approved, Self::Rejected]
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceiptStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_column(s))
    }
}

impl From<String> for ReceiptStatus {
    fn from(value: String) -> Self {
        Self::from_column(&value)
    }
}

impl From<ReceiptStatus> for String {
    fn from(status: ReceiptStatus) -> Self {
        match status {
            ReceiptStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Outcome an admin can record on a receipt.
///
/// Has no `under_review`: no operation moves a receipt back
/// into review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl ApprovalDecision {
    /// Status the receipt ends up in.
    #[must_use]
    pub fn status(self) -> ReceiptStatus {
        match self {
            Self::Approved => ReceiptStatus::Approved,
            Self::Rejected => ReceiptStatus::Rejected,
        }
    }
}

impl From<ApprovalDecision> for ReceiptStatus {
    fn from(decision: ApprovalDecision) -> Self {
        decision.status()
    }
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.status(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_column_text() {
        for status in ReceiptStatus::known() {
            assert_eq!(ReceiptStatus::from_column(status.as_str()), status);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(ReceiptStatus::from_column("APPROVED"), ReceiptStatus::Approved);
        assert_eq!(ReceiptStatus::from_column(" rejected "), ReceiptStatus::Rejected);
    }

    #[test]
    fn test_unlisted_status_is_kept_verbatim() {
        let status = ReceiptStatus::from_column("paid");
        assert_eq!(status, ReceiptStatus::Other("paid".to_string()));
        assert_eq!(status.as_str(), "paid");
        assert!(!status.is_decided());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"paid\"");

        let parsed: ReceiptStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(parsed.to_string(), "on_hold");
    }

    #[test]
    fn test_default_status_is_under_review() {
        assert_eq!(ReceiptStatus::default(), ReceiptStatus::UnderReview);
        assert!(!ReceiptStatus::UnderReview.is_decided());
    }

    #[test]
    fn test_decision_never_maps_to_under_review() {
        assert_eq!(ApprovalDecision::Approved.status(), ReceiptStatus::Approved);
        assert_eq!(ApprovalDecision::Rejected.status(), ReceiptStatus::Rejected);
        assert!(ApprovalDecision::Approved.status().is_decided());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&ReceiptStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let decision: ApprovalDecision = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(decision, ApprovalDecision::Rejected);
    }
}
