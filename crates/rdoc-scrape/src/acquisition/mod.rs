//! Network access: page fetching, request throttling and link pre-flight.

pub mod http_client;
pub mod link_check;
pub mod throttle;
