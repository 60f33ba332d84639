pub mod error;
pub mod tags;
pub mod health {
    pub mod routes;
}
pub mod grocery_list {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod grocery_item {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
