/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Delivery status a fresh order starts in; updated by fulfilment tooling
/// outside this service.
#[allow(dead_code)]
pub const DELIVERY_STATUS_PENDING: &str = "pending";
