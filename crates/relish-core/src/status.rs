use std::fmt;

/// Delivery-progress state reported by the tracked page.
///
/// `Unknown` is the fallback for any label text that does not exactly match
/// one of the three known phrases; it is a valid value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Placed,
    Preparing,
    Arrived,
    Unknown,
}

impl OrderStatus {
    /// Classify the text of the status label on the schedule page.
    ///
    /// Matching is exact and case-sensitive; callers are expected to trim
    /// surrounding whitespace before classifying. Total function: every
    /// input maps to a status.
    pub fn from_label(text: &str) -> Self {
        match text {
            "Order Placed" => OrderStatus::Placed,
            "Preparing Your Order" => OrderStatus::Preparing,
            "Order Arrived" => OrderStatus::Arrived,
            _ => OrderStatus::Unknown,
        }
    }

    /// The canonical page label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order Placed",
            OrderStatus::Preparing => "Preparing Your Order",
            OrderStatus::Arrived => "Order Arrived",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
