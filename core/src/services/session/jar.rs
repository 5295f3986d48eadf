//! Cookie storage abstraction

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

/// `SameSite` cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            other => Err(format!("Invalid SameSite value: {}", other)),
        }
    }
}

/// A cookie to write, with its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub max_age: Duration,
    pub path: String,
    pub domain: Option<String>,
    pub same_site: SameSite,
    pub secure: bool,
    pub http_only: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, max_age: Duration) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age,
            path: "/".to_string(),
            domain: None,
            same_site: SameSite::Lax,
            secure: false,
            http_only: false,
        }
    }
}

/// Somewhere cookies can be read from and written to
pub trait CookieJar {
    /// Current value of a cookie, if present
    fn get(&self, name: &str) -> Option<String>;

    /// Write or replace a cookie
    fn set(&mut self, cookie: SessionCookie);

    /// Delete a cookie
    fn remove(&mut self, name: &str);
}

/// Cookie jar held in memory, for tests and non-HTTP callers
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieJar {
    cookies: HashMap<String, SessionCookie>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full cookie including attributes
    pub fn cookie(&self, name: &str) -> Option<&SessionCookie> {
        self.cookies.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|cookie| cookie.value.clone())
    }

    fn set(&mut self, cookie: SessionCookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }

    fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }
}
