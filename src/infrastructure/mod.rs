pub mod limiter;
pub mod store;
pub mod utils;
pub mod web;
