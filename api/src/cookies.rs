//! Cookie jar backed by the actix request and response
//!
//! Reads come from the incoming request, writes are collected and applied
//! to the response builder once the handler has succeeded.

use std::collections::HashMap;
use std::time::Duration;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite as CookieSameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use uuid::Uuid;

use cw_core::services::session::{CookieJar, SameSite, SessionCookie, SessionPolicy};
use cw_shared::config::AUTH_FLOW_COOKIE;

/// `CookieJar` over one request/response exchange
pub struct RequestCookieJar<'a> {
    request: &'a HttpRequest,
    domain: Option<String>,
    /// Values written during this exchange; `None` marks a removal
    pending: HashMap<String, Option<String>>,
    changes: Vec<Cookie<'static>>,
}

impl<'a> RequestCookieJar<'a> {
    pub fn new(request: &'a HttpRequest, policy: &SessionPolicy) -> Self {
        Self {
            request,
            domain: policy.domain.clone(),
            pending: HashMap::new(),
            changes: Vec::new(),
        }
    }

    /// Attach every collected `Set-Cookie` to the response
    pub fn apply(self, response: &mut HttpResponseBuilder) {
        for cookie in self.changes {
            response.cookie(cookie);
        }
    }
}

impl CookieJar for RequestCookieJar<'_> {
    fn get(&self, name: &str) -> Option<String> {
        match self.pending.get(name) {
            Some(value) => value.clone(),
            None => self
                .request
                .cookie(name)
                .map(|cookie| cookie.value().to_string()),
        }
    }

    fn set(&mut self, cookie: SessionCookie) {
        self.pending
            .insert(cookie.name.clone(), Some(cookie.value.clone()));
        self.changes.push(to_response_cookie(cookie));
    }

    fn remove(&mut self, name: &str) {
        self.pending.insert(name.to_string(), None);

        let mut removal = Cookie::build(name.to_string(), "").path("/").finish();
        if let Some(domain) = &self.domain {
            removal.set_domain(domain.clone());
        }
        removal.make_removal();
        self.changes.push(removal);
    }
}

fn to_response_cookie(cookie: SessionCookie) -> Cookie<'static> {
    let same_site = match cookie.same_site {
        SameSite::Strict => CookieSameSite::Strict,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::None => CookieSameSite::None,
    };

    let mut builder = Cookie::build(cookie.name, cookie.value)
        .path(cookie.path)
        .max_age(CookieDuration::seconds(cookie.max_age.as_secs() as i64))
        .same_site(same_site)
        .secure(cookie.secure)
        .http_only(cookie.http_only);
    if let Some(domain) = cookie.domain {
        builder = builder.domain(domain);
    }
    builder.finish()
}

/// The `auth_flow` cookie pointing at a stored flow. Never readable from scripts.
pub fn flow_cookie(policy: &SessionPolicy, id: Uuid, ttl: Duration) -> SessionCookie {
    SessionCookie {
        http_only: true,
        ..policy.cookie(AUTH_FLOW_COOKIE, id.to_string(), ttl)
    }
}

/// Flow id carried by the request, if it parses
pub fn flow_id(request: &HttpRequest) -> Option<Uuid> {
    request
        .cookie(AUTH_FLOW_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use actix_web::HttpResponse;

    #[test]
    fn test_jar_reads_request_then_pending_writes() {
        let request = TestRequest::default()
            .cookie(Cookie::new("auth_token", "old"))
            .to_http_request();
        let policy = SessionPolicy::default();
        let mut jar = RequestCookieJar::new(&request, &policy);

        assert_eq!(jar.get("auth_token").as_deref(), Some("old"));
        jar.set(policy.cookie("auth_token", "new", Duration::from_secs(60)));
        assert_eq!(jar.get("auth_token").as_deref(), Some("new"));
        jar.remove("auth_token");
        assert_eq!(jar.get("auth_token"), None);
        assert_eq!(jar.changes.len(), 2);
    }

    #[test]
    fn test_applied_cookie_attributes() {
        let request = TestRequest::default().to_http_request();
        let mut policy = SessionPolicy::default();
        policy.secure = true;
        let mut jar = RequestCookieJar::new(&request, &policy);
        jar.set(policy.cookie("refresh_token", "r1", Duration::from_secs(30 * 24 * 3600)));

        let mut builder = HttpResponse::Ok();
        jar.apply(&mut builder);
        let response = builder.finish();
        let cookie = response.cookies().next().unwrap();

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "r1");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(CookieSameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(30)));
    }

    #[test]
    fn test_flow_cookie_is_http_only() {
        let id = Uuid::new_v4();
        let cookie = flow_cookie(&SessionPolicy::default(), id, Duration::from_secs(900));
        assert!(cookie.http_only);
        assert_eq!(cookie.value, id.to_string());

        let request = TestRequest::default()
            .cookie(Cookie::new(AUTH_FLOW_COOKIE, id.to_string()))
            .to_http_request();
        assert_eq!(flow_id(&request), Some(id));

        let garbled = TestRequest::default()
            .cookie(Cookie::new(AUTH_FLOW_COOKIE, "not-a-uuid"))
            .to_http_request();
        assert_eq!(flow_id(&garbled), None);
    }
}
