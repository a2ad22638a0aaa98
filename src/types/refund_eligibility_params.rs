use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Parameters for the refund eligibility check.
///
/// A pure query: the backend evaluates policy without recording anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefundEligibilityParams {
    /// The order being evaluated.
    pub order_id: String,

    /// Product category, which selects the applicable return window.
    pub product_category: String,

    /// When the order was purchased.
    #[serde(with = "crate::utils::time")]
    pub purchase_date: OffsetDateTime,

    /// Optional stated reason for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RefundEligibilityParams {
    /// Creates params for the given order.
    pub fn new(
        order_id: impl Into<String>,
        product_category: impl Into<String>,
        purchase_date: OffsetDateTime,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_category: product_category.into(),
            purchase_date,
            reason: None,
        }
    }

    /// Attaches a stated reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
