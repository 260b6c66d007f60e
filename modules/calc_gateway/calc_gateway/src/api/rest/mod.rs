pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;

/// Content type of every response body written by this module.
pub const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";
