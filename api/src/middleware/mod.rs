pub mod cors;
pub mod request_id;
pub mod security;

pub use cors::create_cors;
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware, REQUEST_ID_HEADER};
pub use security::SecurityMiddleware;
