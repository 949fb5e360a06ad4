use reqwest::{Client, Url};

use crate::config::EngineConfig;
use crate::intercept_errors::InterceptError;

use super::{EstimateRequest, EstimateResponse, RemoteEstimator};

/// Estimation service reached over HTTP: one JSON `POST` per request.
///
/// The client is built once with the configured timeout and reused for every run, so
/// connections are pooled across simulations.
#[derive(Debug, Clone)]
pub struct HttpEstimator {
    http_client: Client,
    endpoint: Url,
}

impl HttpEstimator {
    /// Build the HTTP client from the engine configuration.
    ///
    /// Argument
    /// --------
    /// * `config`: engine configuration providing the endpoint and the timeout
    ///
    /// Return
    /// ------
    /// * the estimator, or [`InterceptError::ReqwestError`] if the TLS backend cannot be initialized
    pub fn new(config: &EngineConfig) -> Result<Self, InterceptError> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        Ok(HttpEstimator {
            http_client,
            endpoint: config.endpoint().clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl RemoteEstimator for HttpEstimator {
    async fn request_estimate(
        &self,
        request: &EstimateRequest,
    ) -> Result<EstimateResponse, InterceptError> {
        log::debug!("POST {} {:?}", self.endpoint, request);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InterceptError::RemoteStatus(status.as_u16()));
        }

        Ok(response.json::<EstimateResponse>().await?)
    }
}
