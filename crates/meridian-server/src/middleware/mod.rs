//! Middleware stack para el servidor HTTP.
//!
//! - `RequestIdLayer`: genera/propaga X-Request-Id
//! - `access_log`: logging estructurado por request

mod logging;
mod request_id;

pub use logging::access_log;
pub use request_id::{RequestIdLayer, RequestIdService, REQUEST_ID_HEADER};
