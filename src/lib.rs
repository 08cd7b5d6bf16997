pub mod config;
pub mod domain;
pub mod error;
pub mod football_data;
pub mod form;
pub mod http_client;
pub mod league_params;
pub mod poisson;
pub mod predict;
pub mod qualification;
pub mod server;
pub mod service;
pub mod strength;
pub mod ttl_cache;
