pub mod catalog_service;
pub mod cost_service;
pub mod rate_resolver;
pub mod season_service;
