pub mod application {
    pub mod grocery_item {
        pub mod service;
    }
    pub mod grocery_list {
        pub mod service;
    }
    #[cfg(test)]
    pub(crate) mod test_support;
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod repository;
    pub mod unit_of_work;
    pub mod grocery_item {
        pub mod errors;
        pub mod model;
        pub mod service;
        pub mod value_objects;
    }
    pub mod grocery_list {
        pub mod errors;
        pub mod model;
        pub mod service;
    }
}
