//! Cookies issued by the PlotPilot backend to one visitor.
//!
//! The backend keeps its login session in a cookie. Each visitor of this
//! front end gets its own jar so that backend calls made on their behalf
//! carry their session, never someone else's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name → value cookie jar for a single visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendCookies(BTreeMap<String, String>);

impl BackendCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Value for an outgoing `Cookie` header, or `None` for an empty jar.
    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }

        Some(
            self.0
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Merges one `Set-Cookie` header value into the jar.
    ///
    /// A cookie is removed when its value is empty, when `Max-Age` is zero or
    /// negative, or when `Expires` lies in the past. Malformed headers are
    /// ignored.
    pub fn apply_set_cookie(&mut self, header: &str) {
        self.apply_set_cookie_at(header, Utc::now());
    }

    fn apply_set_cookie_at(&mut self, header: &str, now: DateTime<Utc>) {
        let mut parts = header.split(';');

        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };

        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let value = value.trim();
        let mut expired = value.is_empty() || value == "\"\"";

        for attribute in parts {
            let Some((key, attr_value)) = attribute.split_once('=') else {
                continue;
            };
            let attr_value = attr_value.trim();

            if key.trim().eq_ignore_ascii_case("max-age") {
                if attr_value.parse::<i64>().is_ok_and(|age| age <= 0) {
                    expired = true;
                }
            } else if key.trim().eq_ignore_ascii_case("expires")
                && DateTime::parse_from_rfc2822(attr_value).is_ok_and(|at| at < now)
            {
                expired = true;
            }
        }

        if expired {
            self.0.remove(name);
        } else {
            self.0.insert(name.to_string(), value.to_string());
        }
    }
}
