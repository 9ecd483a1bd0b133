pub mod config_response;
pub mod config_route;
