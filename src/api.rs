use crate::errors::AppError;
use crate::models::{Journey, MetricSubmission, ProtocolDocument};
use crate::view::SubmissionReport;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

/// Thin client for the upstream journey API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_journey(&self, client_id: &str) -> Result<Journey, AppError> {
        let url = format!(
            "{}/api/client/{}/journey",
            self.base_url,
            urlencoding::encode(client_id)
        );
        self.get_json(&url).await
    }

    pub async fn fetch_protocol(&self, protocol_id: &str) -> Result<ProtocolDocument, AppError> {
        let url = format!(
            "{}/api/protocol/{}",
            self.base_url,
            urlencoding::encode(protocol_id)
        );
        self.get_json(&url).await
    }

    pub async fn record_metric(&self, submission: &MetricSubmission) -> Result<(), AppError> {
        self.http
            .post(format!("{}/api/metric/record", self.base_url))
            .json(submission)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Posts each submission on its own; one failure does not stop the rest.
    pub async fn submit_all(&self, submissions: &[MetricSubmission]) -> SubmissionReport {
        let mut report = SubmissionReport::default();
        for submission in submissions {
            match self.record_metric(submission).await {
                Ok(()) => report.record(true),
                Err(err) => {
                    warn!(
                        client_id = %submission.client_id,
                        metric = %submission.metric_name,
                        "failed to record metric: {err}"
                    );
                    report.record(false);
                }
            }
        }
        report
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self.http.get(url).send().await.map_err(|err| {
            error!("request to {url} failed: {err}");
            AppError::from(err)
        })?;

        let response = response.error_for_status().map_err(|err| {
            error!("{url} returned {:?}", err.status());
            AppError::from(err)
        })?;

        response.json::<T>().await.map_err(|err| {
            error!("unreadable payload from {url}: {err}");
            AppError::upstream(err.to_string())
        })
    }
}
