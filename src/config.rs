use std::env;

pub const BASE_URL_ENV: &str = "PRENOTAZIONI_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Where the booking endpoints live. Paths are joined onto `base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub bookings_path: String,
    pub show_dates_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bookings_path: "/api/prenotazioni".to_string(),
            show_dates_path: "/api/repliche".to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(resolve_base_url())
    }

    /// `GET` list of the user's bookings, and also the shared mutation endpoint.
    pub fn bookings_url(&self) -> String {
        self.join(&self.bookings_path)
    }

    pub fn mutation_url(&self) -> String {
        self.bookings_url()
    }

    pub fn show_dates_url(&self, event_id: i64) -> String {
        format!(
            "{}/{event_id}",
            self.join(self.show_dates_path.trim_end_matches('/'))
        )
    }

    fn join(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

pub fn resolve_base_url() -> String {
    if let Ok(url) = env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            return url;
        }
    }

    DEFAULT_BASE_URL.to_string()
}
