use std::sync::Arc;

use logger::TracingLogger;

use business::application::grocery_item::service::GroceryItemServiceImpl;
use business::application::grocery_list::service::GroceryListServiceImpl;
use business::domain::unit_of_work::UnitOfWorkFactory;

use crate::api::grocery_item::routes::GroceryItemApi;
use crate::api::grocery_list::routes::GroceryListApi;
use crate::api::health::routes::HealthApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub grocery_list_api: GroceryListApi,
    pub grocery_item_api: GroceryItemApi,
}

impl DependencyContainer {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        let logger = Arc::new(TracingLogger);

        let grocery_list_service = Arc::new(GroceryListServiceImpl {
            logger: logger.clone(),
        });
        let grocery_item_service = Arc::new(GroceryItemServiceImpl { logger });

        Self {
            health_api: HealthApi,
            grocery_list_api: GroceryListApi::new(uow_factory.clone(), grocery_list_service),
            grocery_item_api: GroceryItemApi::new(uow_factory, grocery_item_service),
        }
    }
}
