//! Session access module.
//!
//! Every read and write of the auth cookies goes through [`AuthSession`];
//! callers supply a [`CookieJar`] for the transport they run on.

pub mod jar;
pub mod policy;
pub mod auth_session;

pub use jar::{CookieJar, MemoryCookieJar, SameSite, SessionCookie};
pub use policy::SessionPolicy;
pub use auth_session::{decode_user_data, encode_user_data, AuthSession, SessionSnapshot};
