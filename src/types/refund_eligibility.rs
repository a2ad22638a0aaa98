use serde::{Deserialize, Serialize};

/// Result of a refund eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefundEligibility {
    /// Whether the order qualifies for a refund.
    pub eligible: bool,

    /// Why the order does or does not qualify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Amount refundable, when eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
}
