//! Network-free helpers: Wei conversion and transaction direction checks.

use serde_json::Value;

use crate::api::{InternalTransaction, Transaction};
use crate::error::CoreError;

/// Wei per Ether.
pub const WEI_PER_ETHER: f64 = 1e18;

/// Convert an amount in Wei to Ether.
pub fn convert_amount(base_units: u128) -> f64 {
    base_units as f64 / WEI_PER_ETHER
}

/// Parse a decimal Wei amount as Etherscan reports it (`"40891626854930000000000"`).
pub fn parse_base_units(amount: &str) -> Result<u128, CoreError> {
    amount
        .trim()
        .parse()
        .map_err(|e| CoreError::Decode(format!("invalid base unit amount `{amount}`: {e}")))
}

// ==============================================================================
// Transaction Direction
// ==============================================================================

/// Records that name a sender and a recipient.
pub trait TransferParties {
    fn from_address(&self) -> Option<&str>;
    fn to_address(&self) -> Option<&str>;
}

impl TransferParties for Transaction {
    fn from_address(&self) -> Option<&str> {
        Some(&self.from)
    }

    fn to_address(&self) -> Option<&str> {
        Some(&self.to)
    }
}

impl TransferParties for InternalTransaction {
    fn from_address(&self) -> Option<&str> {
        Some(&self.from)
    }

    fn to_address(&self) -> Option<&str> {
        Some(&self.to)
    }
}

/// Raw JSON records; a missing or non-string field has no address.
impl TransferParties for Value {
    fn from_address(&self) -> Option<&str> {
        self.get("from").and_then(Value::as_str)
    }

    fn to_address(&self) -> Option<&str> {
        self.get("to").and_then(Value::as_str)
    }
}

/// Whether `tx` pays into `address` (case-insensitive match on `to`).
pub fn is_input_transaction<T: TransferParties + ?Sized>(address: &str, tx: &T) -> bool {
    tx.to_address()
        .is_some_and(|to| to.eq_ignore_ascii_case(address))
}

/// Whether `tx` is sent from `address` (case-insensitive match on `from`).
pub fn is_output_transaction<T: TransferParties + ?Sized>(address: &str, tx: &T) -> bool {
    tx.from_address()
        .is_some_and(|from| from.eq_ignore_ascii_case(address))
}
