//! Settings configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::submit::AggregationPolicy;

/// Where and how holiday maps are saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Scheme and host of the holiday page, e.g. `http://timetracker.local`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the ajax dispatcher that accepts `mass_holidays` posts
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Extra request headers (session cookie, CSRF token)
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl EndpointSettings {
    /// Full URL of the save endpoint
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            headers: BTreeMap::new(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_path() -> String {
    "/ajax/".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    30
}

/// Submission behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSettings {
    /// Show server-reported failures while submitting all users.
    /// Successes are never shown per user during submit-all.
    #[serde(default = "default_notify_mass_failures")]
    pub notify_mass_failures: bool,

    /// How submit-all turns per-user outcomes into one status
    #[serde(default)]
    pub aggregation: AggregationPolicy,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            notify_mass_failures: default_notify_mass_failures(),
            aggregation: AggregationPolicy::default(),
        }
    }
}

fn default_notify_mass_failures() -> bool {
    true
}

/// GUI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiSettings {
    /// Width of one day cell in points
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,

    /// Width reserved for the employee name column
    #[serde(default = "default_name_width")]
    pub name_width: f32,

    #[serde(default = "default_window_width")]
    pub window_width: f32,

    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            cell_width: default_cell_width(),
            name_width: default_name_width(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

fn default_cell_width() -> f32 {
    28.0
}

fn default_name_width() -> f32 {
    200.0
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    560.0
}
