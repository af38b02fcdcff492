//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Categories
// =============================================================================

/// Slug of the catch-all category shown as active in the category bar
pub const ALL_CATEGORY_SLUG: &str = "all";

/// Maximum length of a category or product name
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length of a slug
pub const MAX_SLUG_LENGTH: usize = 80;

// =============================================================================
// Products
// =============================================================================

/// Minimum allowed product price
pub const MIN_PRICE: f64 = 0.0;

/// Refund policy wire values, in display order
pub const REFUND_POLICY_VALUES: &[&str] =
    &["no-refunds", "1-day", "3-day", "7-day", "14-day", "30-day"];
