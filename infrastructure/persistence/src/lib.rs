pub mod db;
pub mod unit_of_work;
pub mod grocery_list {
    pub mod entity;
    pub mod repository;
}
pub mod grocery_item {
    pub mod entity;
    pub mod repository;
}
pub mod memory {
    pub mod database;
    pub mod repository;
    pub(crate) mod state;

    pub use database::{Collection, Fault, InMemoryDatabase, InMemoryUnitOfWork, Operation};
}
