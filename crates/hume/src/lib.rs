//! A client for the Hume batch API that scores emotions in text.
//!
//! [`HumeClient::analyze`] submits a batch of texts as one job, waits for
//! the job to complete, and reduces the word-level predictions of every text
//! to a single ranked list of emotions (see [`aggregate`]).

#[macro_use]
extern crate tracing;

mod aggregate;
mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use backoff::ExponentialBackoffBuilder;
use mime::Mime;
use reqwest::{Client, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

pub use aggregate::{EmotionScore, TextEmotions, aggregate};
pub use config::{DEFAULT_BASE_URL, HumeConfig, HumeConfigBuilder};
pub use proto::{
    EmotionEntry, GroupedPredictions, LanguagePredictions, ModelPredictions,
    Position, Prediction, WordPrediction,
};
use proto::{JobCreated, JobDetails, JobStatus, SourcePredictions};

const API_KEY_HEADER: &str = "X-Hume-Api-Key";

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be sent or the response could not be read.
    Transport,
    /// The server answered with an error status.
    Status,
    /// The response body is not what the API documents.
    InvalidPayload,
    /// The job finished with a failure.
    JobFailed,
    /// The job did not complete within the configured max wait.
    Timeout,
    /// The words of a text have no total length to average over.
    DegenerateInput,
}

impl ErrorKind {
    /// Returns `true` for failures of the remote service or the network,
    /// as opposed to problems with the predictions themselves.
    #[inline]
    pub fn is_transport(&self) -> bool {
        !matches!(self, ErrorKind::DegenerateInput)
    }
}

/// Error type for [`HumeClient`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_status() {
            ErrorKind::Status
        } else if err.is_decode() {
            ErrorKind::InvalidPayload
        } else {
            ErrorKind::Transport
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

/// Client of the Hume batch API for language emotion detection.
#[derive(Clone, Debug)]
pub struct HumeClient {
    client: Client,
    config: Arc<HumeConfig>,
}

impl HumeClient {
    /// Creates a new `HumeClient` with the given configuration.
    #[inline]
    pub fn new(config: HumeConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Scores the emotions of every text, returning one result per text in
    /// input order.
    ///
    /// Failures of the service are logged and replaced by an empty result
    /// for every text, so callers can't tell which texts failed. Only
    /// [`ErrorKind::DegenerateInput`] is returned as an error. Use
    /// [`try_analyze`](Self::try_analyze) to see every error.
    pub async fn analyze(
        &self,
        texts: &[String],
    ) -> Result<Vec<TextEmotions>, Error> {
        match self.try_analyze(texts).await {
            Ok(results) => Ok(results),
            Err(err) if err.kind().is_transport() => {
                error!("error calling Hume API ({:?}): {err}", err.kind());
                Ok(vec![TextEmotions::default(); texts.len()])
            }
            Err(err) => Err(err),
        }
    }

    /// Same as [`analyze`](Self::analyze), but returns every error.
    pub async fn try_analyze(
        &self,
        texts: &[String],
    ) -> Result<Vec<TextEmotions>, Error> {
        let job_id = self.submit(texts).await?;
        sleep(self.config.initial_delay).await;
        self.wait_for_completion(&job_id).await?;

        let sources: Vec<SourcePredictions> = self
            .send(self.get(&format!("/batch/jobs/{job_id}/predictions")))
            .await?;
        let Some(source) = sources.into_iter().next() else {
            return Err(Error::new(
                "no predictions in the job",
                ErrorKind::InvalidPayload,
            ));
        };
        if let Some(message) = source.error {
            return Err(Error::new(message, ErrorKind::JobFailed));
        }
        let Some(results) = source.results else {
            return Err(Error::new(
                "no results in the job",
                ErrorKind::InvalidPayload,
            ));
        };
        if !results.errors.is_empty() {
            warn!("job {job_id} reported errors: {:?}", results.errors);
        }
        if results.predictions.len() != texts.len() {
            warn!(
                "job {job_id} returned {} predictions for {} texts",
                results.predictions.len(),
                texts.len()
            );
        }

        results.predictions.iter().map(aggregate).collect()
    }

    async fn submit(&self, texts: &[String]) -> Result<String, Error> {
        debug!("submitting a job of {} texts", texts.len());
        let req = self
            .client
            .post(self.config.url("/batch/jobs"))
            .json(&proto::create_request(texts));
        let created: JobCreated = self.send(req).await?;
        debug!("job {} submitted", created.job_id);
        Ok(created.job_id)
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<(), Error> {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.config.poll_interval)
            .with_max_elapsed_time(Some(self.config.max_wait))
            .build();

        backoff::future::retry(policy, || async move {
            let path = format!("/batch/jobs/{job_id}");
            let details: JobDetails = match self.send(self.get(&path)).await {
                Ok(details) => details,
                Err(err) => return Err(backoff::Error::permanent(err)),
            };
            trace!("job {job_id} is {:?}", details.state.status);

            match details.state.status {
                JobStatus::Completed => Ok(()),
                JobStatus::Failed => Err(backoff::Error::permanent(Error::new(
                    details
                        .state
                        .message
                        .unwrap_or_else(|| format!("job {job_id} failed")),
                    ErrorKind::JobFailed,
                ))),
                status => Err(backoff::Error::transient(Error::new(
                    format!("job {job_id} is still {status:?}"),
                    ErrorKind::Timeout,
                ))),
            }
        })
        .await
    }

    #[inline]
    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.config.url(path))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, Error> {
        let resp = req
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(Error::from_reqwest)?;

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let is_json = content_type
            .and_then(|v| v.parse().ok())
            .map(|m: Mime| m.subtype() == mime::JSON)
            .unwrap_or(true);
        if !is_json {
            return Err(Error::new(
                format!("Unexpected content type: {content_type:?}"),
                ErrorKind::InvalidPayload,
            ));
        }

        let body = resp.bytes().await.map_err(Error::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|err| {
            Error::new(format!("{err}"), ErrorKind::InvalidPayload)
        })
    }
}
