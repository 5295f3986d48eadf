//! Security middleware for HTTPS enforcement and hardening headers.
//!
//! Both behaviors are switched on in production only. The scheme is read
//! from the connection info, which honors `Forwarded` and
//! `X-Forwarded-Proto` from the fronting proxy.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use cw_shared::config::AppConfig;

/// Security middleware factory
#[derive(Debug, Clone, Copy)]
pub struct SecurityMiddleware {
    /// Reject plain-HTTP requests
    enforce_https: bool,
    /// Add HSTS and friends to every response
    add_security_headers: bool,
}

impl SecurityMiddleware {
    pub fn from_config(config: &AppConfig) -> Self {
        let production = config.environment.is_production();
        let middleware = Self {
            enforce_https: production && config.server.is_https(),
            add_security_headers: production,
        };

        log::info!(
            "Security middleware configured: enforce_https={}, add_headers={}",
            middleware.enforce_https,
            middleware.add_security_headers
        );
        middleware
    }

    /// No enforcement, no extra headers
    pub fn development() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            settings: *self,
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    settings: SecurityMiddleware,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let settings = self.settings;

        Box::pin(async move {
            if settings.enforce_https && !is_secure_request(&req) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Err(ErrorForbidden("HTTPS required"));
            }

            let mut response = service.call(req).await?;
            if settings.add_security_headers {
                add_security_response_headers(&mut response);
            }
            Ok(response)
        })
    }
}

fn is_secure_request(req: &ServiceRequest) -> bool {
    let info = req.connection_info();
    if info.scheme() == "https" {
        return true;
    }
    let host = info.host();
    host.starts_with("localhost") || host.starts_with("127.0.0.1") || host.starts_with("[::1]")
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // Auth responses carry tokens in Set-Cookie
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
}
