use super::models::ShiftDayPayload;
use super::ShiftStore;
use crate::components::shift_editor::models::{ShiftScope, SubjectDay, TimeInterval};
use crate::config::Config;
use crate::error::{config_error, persistence_error, EditorResult};
use crate::utils::time::weekday_slug;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Shift store backed by the booking REST API.
///
/// Regular shifts live under `employees/{id}/shifts/regular/{weekday}`,
/// one-off shifts under `employees/{id}/shifts/daily/{YYYY-MM-DD}`. `GET`
/// loads a day, `PUT` replaces it.
#[derive(Debug, Clone)]
pub struct HttpShiftStore {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpShiftStore {
    /// Create a store talking to `base_url`
    pub fn new(base_url: Url, api_token: Option<String>, timeout: Duration) -> EditorResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(config_error(&format!(
                "Shift API URL cannot be used as a base: {}",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    /// Create a store from the application config
    pub fn from_config(config: &Config) -> EditorResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| config_error(&format!("Invalid SHIFT_API_URL: {}", e)))?;

        Self::new(
            base_url,
            config.api_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// URL of the shift resource for a subject-day
    pub fn endpoint(&self, subject_day: &SubjectDay) -> EditorResult<Url> {
        let (kind, day) = match subject_day.scope {
            ShiftScope::Regular(weekday) => ("regular", weekday_slug(weekday).to_string()),
            ShiftScope::OneOff(date) => ("daily", date.format("%Y-%m-%d").to_string()),
        };

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| config_error("Shift API URL cannot be used as a base"))?
            .pop_if_empty()
            .extend([
                "employees",
                subject_day.subject_id.as_str(),
                "shifts",
                kind,
                day.as_str(),
            ]);

        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_payload(response: Response, action: &str) -> EditorResult<Vec<TimeInterval>> {
        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(persistence_error(&format!(
                "Failed to {} shift: HTTP {} - {}",
                action, status, error_body
            )));
        }

        let payload: ShiftDayPayload = response.json().await.map_err(|e| {
            persistence_error(&format!("Failed to parse {} response: {}", action, e))
        })?;

        Ok(payload.intervals)
    }
}

#[async_trait]
impl ShiftStore for HttpShiftStore {
    async fn load_intervals(&self, subject_day: &SubjectDay) -> EditorResult<Vec<TimeInterval>> {
        let url = self.endpoint(subject_day)?;
        debug!("Loading shift from {}", url);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| persistence_error(&format!("Failed to load shift: {}", e)))?;

        // No shift defined for the day yet
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No shift stored for {}", subject_day);
            return Ok(Vec::new());
        }

        Self::read_payload(response, "load").await
    }

    async fn save_intervals(
        &self,
        subject_day: &SubjectDay,
        intervals: &[TimeInterval],
    ) -> EditorResult<Vec<TimeInterval>> {
        let url = self.endpoint(subject_day)?;
        let payload = ShiftDayPayload::new(intervals.to_vec());
        info!(
            "Saving {} interval(s) for {} to {}",
            intervals.len(),
            subject_day,
            url
        );

        let response = self
            .authorize(self.client.put(url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| persistence_error(&format!("Failed to save shift: {}", e)))?;

        Self::read_payload(response, "save").await
    }
}
