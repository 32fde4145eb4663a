//! Coach service adapters

mod http;

pub use http::HttpCoachService;
