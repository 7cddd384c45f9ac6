//! Builder for configuring [`OperationHandler`] instances.

use crate::config::DispatchConfig;
use crate::controllers::{dishes, orders};
use crate::id::{IdGenerator, RandomIdGenerator};
use crate::operation_handler::core::OperationHandler;
use crate::resource::{Dish, Order};
use crate::storage::{InMemoryStore, RecordStore};
use std::sync::Arc;

/// Builder for [`OperationHandler`].
///
/// Stores default to empty [`InMemoryStore`]s. When no id generator is
/// given, a [`RandomIdGenerator`] using the configured strategy is shared
/// by both collections.
///
/// ```rust
/// use grubdash::{DispatchConfig, OperationHandler};
/// use grubdash::id::SequentialIdGenerator;
/// use std::sync::Arc;
///
/// let handler = OperationHandler::builder()
///     .with_config(DispatchConfig::default())
///     .with_id_generator(Arc::new(SequentialIdGenerator::new("id-")))
///     .build();
/// assert_eq!(handler.config(), &DispatchConfig::default());
/// ```
#[derive(Debug)]
pub struct OperationHandlerBuilder<DS = InMemoryStore<Dish>, OS = InMemoryStore<Order>> {
    dish_store: DS,
    order_store: OS,
    ids: Option<Arc<dyn IdGenerator>>,
    config: DispatchConfig,
}

impl OperationHandlerBuilder {
    /// Create a builder with empty in-memory stores and default configuration.
    pub fn new() -> Self {
        Self {
            dish_store: InMemoryStore::new(),
            order_store: InMemoryStore::new(),
            ids: None,
            config: DispatchConfig::default(),
        }
    }
}

impl Default for OperationHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<DS, OS> OperationHandlerBuilder<DS, OS> {
    /// Back the dishes collection with `store`.
    pub fn with_dish_store<T>(self, store: T) -> OperationHandlerBuilder<T, OS> {
        OperationHandlerBuilder {
            dish_store: store,
            order_store: self.order_store,
            ids: self.ids,
            config: self.config,
        }
    }

    /// Back the orders collection with `store`.
    pub fn with_order_store<T>(self, store: T) -> OperationHandlerBuilder<DS, T> {
        OperationHandlerBuilder {
            dish_store: self.dish_store,
            order_store: store,
            ids: self.ids,
            config: self.config,
        }
    }

    /// Use a custom id generator for both collections.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }
}

impl<DS, OS> OperationHandlerBuilder<DS, OS>
where
    DS: RecordStore<Dish> + 'static,
    OS: RecordStore<Order> + 'static,
{
    /// Build the handler, registering the dish and order pipelines.
    pub fn build(self) -> OperationHandler<DS, OS> {
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(RandomIdGenerator::new(self.config.id_strategy)));

        OperationHandler {
            dishes: dishes::routes(self.dish_store, Arc::clone(&ids)),
            orders: orders::routes(self.order_store, ids, self.config.default_order_status),
            config: self.config,
        }
    }
}
