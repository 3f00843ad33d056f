//! The approval workflow shared by products and advertisements.
//!
//! Every submitted listing starts out `pending`. An admin moves it to
//! `approved` or `rejected`; both are terminal for the workflow. The only
//! way back to `pending` is the owner editing the listing, which resubmits
//! it for review.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Request DTO for an admin rejecting a listing or advertisement
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RejectDto {
    /// Optional feedback shown to the vendor
    pub feedback: Option<String>,
}

/// Moderation status enum matching the database `approval_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Whether an admin may transition an entity out of this status.
    /// Approve/reject are only legal from `pending`; the database re-checks
    /// this precondition inside the UPDATE itself.
    pub fn can_moderate(self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    pub fn is_terminal(self) -> bool {
        !self.can_moderate()
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Payment status enum matching the database `payment_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_be_moderated() {
        assert!(ApprovalStatus::Pending.can_moderate());
        assert!(!ApprovalStatus::Approved.can_moderate());
        assert!(!ApprovalStatus::Rejected.can_moderate());
    }

    #[test]
    fn test_approved_and_rejected_are_terminal() {
        assert!(ApprovalStatus::Approved.is_terminal());
        assert!(ApprovalStatus::Rejected.is_terminal());
        assert!(!ApprovalStatus::Pending.is_terminal());
    }

    #[test]
    fn test_serde_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<ApprovalStatus>("\"rejected\"").unwrap(),
            ApprovalStatus::Rejected
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"paid\""
        );
    }
}
