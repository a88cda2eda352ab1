//! Blocking HTTP client for the save endpoint

use std::collections::BTreeMap;

use tracing::debug;

use super::error::SubmitError;
use super::types::{MassHolidaysRequest, SubmitResponse};
use crate::config::EndpointSettings;

/// The dispatcher only serves requests flagged as ajax
const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Client for the ajax save endpoint
#[derive(Clone)]
pub struct AjaxClient {
    url: String,
    headers: BTreeMap<String, String>,
    agent: ureq::Agent,
}

impl AjaxClient {
    /// Create a client for a full endpoint URL with default timeouts
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_settings(&EndpointSettings {
            base_url: url.into(),
            path: String::new(),
            ..EndpointSettings::default()
        })
    }

    /// Create a client from endpoint settings
    pub fn with_settings(settings: &EndpointSettings) -> Self {
        let url = if settings.path.is_empty() {
            settings.base_url.clone()
        } else {
            settings.url()
        };
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(settings.connect_timeout())
            .timeout_read(settings.read_timeout())
            .build();

        Self {
            url,
            headers: settings.headers.clone(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post one user's holiday map and decode the JSON answer
    pub fn post_mass_holidays(
        &self,
        request: &MassHolidaysRequest,
    ) -> Result<SubmitResponse, SubmitError> {
        let fields = request.form_fields();
        let form: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let mut call = self
            .agent
            .post(&self.url)
            .set(AJAX_HEADER.0, AJAX_HEADER.1)
            .set("Accept", "application/json");
        for (name, value) in &self.headers {
            call = call.set(name, value);
        }

        debug!(
            "[holiday-grid:http] POST {} user={} days={}",
            self.url,
            request.user_id,
            request.holiday_data.len()
        );

        let response = call
            .send_form(&form)
            .map_err(|e| SubmitError::from_ureq(&self.url, e))?;
        let body: SubmitResponse = response.into_json()?;
        Ok(body)
    }
}

impl std::fmt::Debug for AjaxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AjaxClient").field("url", &self.url).finish()
    }
}
