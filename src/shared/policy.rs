//! Role-based authorization policy.
//!
//! One predicate table shared by the route guards and the services, so the
//! answer to "may this role do that" lives in exactly one place instead of
//! being re-derived with ad hoc role comparisons at every call site.

use crate::features::users::models::UserRole;

/// Everything a caller can ask the service to do that is gated by role.
/// Ownership checks (may only edit *own* listing, may only cancel *own*
/// order) are layered on top of these in the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitListing,
    EditOwnListing,
    DeleteOwnListing,
    ModerateListing,
    ManageUsers,
    ViewAllOrders,
    AddToWatchlist,
    PayOrder,
    WriteReview,
}

/// The single authorization predicate.
pub fn allows(role: UserRole, action: Action) -> bool {
    use Action::*;
    use UserRole::*;

    match (role, action) {
        (Vendor, SubmitListing | EditOwnListing | DeleteOwnListing) => true,
        (Admin, ModerateListing | ManageUsers | ViewAllOrders) => true,
        (User, AddToWatchlist | PayOrder | WriteReview) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_vendors_submit_listings() {
        assert!(allows(UserRole::Vendor, Action::SubmitListing));
        assert!(!allows(UserRole::User, Action::SubmitListing));
        assert!(!allows(UserRole::Admin, Action::SubmitListing));
    }

    #[test]
    fn test_only_admins_moderate() {
        assert!(allows(UserRole::Admin, Action::ModerateListing));
        assert!(!allows(UserRole::Vendor, Action::ModerateListing));
        assert!(!allows(UserRole::User, Action::ModerateListing));
    }

    #[test]
    fn test_admins_and_vendors_cannot_hold_a_watchlist() {
        assert!(allows(UserRole::User, Action::AddToWatchlist));
        assert!(!allows(UserRole::Vendor, Action::AddToWatchlist));
        assert!(!allows(UserRole::Admin, Action::AddToWatchlist));
    }

    #[test]
    fn test_only_buyers_pay_and_review() {
        for action in [Action::PayOrder, Action::WriteReview] {
            assert!(allows(UserRole::User, action));
            assert!(!allows(UserRole::Vendor, action));
            assert!(!allows(UserRole::Admin, action));
        }
    }

    #[test]
    fn test_user_management_is_admin_only() {
        assert!(allows(UserRole::Admin, Action::ManageUsers));
        assert!(allows(UserRole::Admin, Action::ViewAllOrders));
        assert!(!allows(UserRole::User, Action::ManageUsers));
        assert!(!allows(UserRole::Vendor, Action::ViewAllOrders));
    }
}
