//! Dispatcher configuration.
//!
//! The configuration is plain data and deserializes from JSON, so hosts can
//! keep it next to their own settings. Every field has a default.

use crate::id::IdStrategy;
use crate::resource::OrderStatus;
use serde::{Deserialize, Serialize};

/// Tunables for an [`OperationHandler`](crate::OperationHandler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatchConfig {
    /// Format of generated record ids when no custom generator is supplied.
    pub id_strategy: IdStrategy,

    /// Status given to newly created orders. Defaults to `pending`.
    pub default_order_status: OrderStatus,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Hex,
            default_order_status: OrderStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.id_strategy, IdStrategy::Hex);
        assert_eq!(config.default_order_status, OrderStatus::Pending);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DispatchConfig =
            serde_json::from_value(json!({"idStrategy": "uuid"})).unwrap();
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.default_order_status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_from_json() {
        let config: DispatchConfig =
            serde_json::from_value(json!({"defaultOrderStatus": "preparing"})).unwrap();
        assert_eq!(config.default_order_status, OrderStatus::Preparing);
    }
}
