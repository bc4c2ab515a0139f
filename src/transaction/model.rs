use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A value transfer waiting in the pool or committed inside a block.
///
/// No accounting is attached: amounts and parties are recorded as given.
/// `amount` keeps its JSON number form (integer or fractional) so it
/// re-serializes, and hashes, exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}
