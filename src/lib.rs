pub mod clients;
pub mod config;
pub mod domain {
    pub mod features;
    pub mod offer;
    pub mod transaction;
}
pub mod error;
pub mod history;
pub mod http {
    pub mod handlers {
        pub mod member_data;
        pub mod model;
        pub mod requests;
    }
    pub mod routes;
}
pub mod importer;
pub mod logging;
pub mod metrics;
pub mod scoring {
    pub mod features;
    pub mod model;
    pub mod offer_policy;
}
pub mod service {
    pub mod offer_service;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub offer_service: service::offer_service::OfferService,
}

#[derive(Clone)]
pub struct HistoryState {
    pub store: Arc<dyn history::HistoryStore>,
}
