use std::io::Read;

use async_trait::async_trait;
use log::debug;
use reqwest::{Response, StatusCode};
use wellcheck_model::{
    metabolic::MetabolicResult,
    payload::{BiometricPayload, QuizScore},
    quiz::QuizAnswers,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
    #[error("unreadable input: {0}")]
    InputError(String),
}

type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn calculate(&self, payload: &BiometricPayload) -> Result<MetabolicResult>;
    async fn submit_quiz(&self, answers: &QuizAnswers) -> Result<i32>;
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

fn check_status(status: StatusCode) -> Result<()> {
    if status.is_client_error() {
        Err(Error::RequestError)
    } else if status.is_server_error() {
        Err(Error::InternalServerError)
    } else {
        Ok(())
    }
}

fn accept(resp: Response) -> Result<Response> {
    check_status(resp.status()).map(|_| resp)
}

#[async_trait]
impl Client for ClientImpl {
    async fn calculate(&self, payload: &BiometricPayload) -> Result<MetabolicResult> {
        self.client
            .post(format!("{}/calculate", self.url))
            .json(payload)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(accept)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn submit_quiz(&self, answers: &QuizAnswers) -> Result<i32> {
        self.client
            .post(format!("{}/result", self.url))
            .form(answers)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(accept)?
            .json::<QuizScore>()
            .await
            .map(|score| score.score)
            .map_err(|_| Error::ResponseError)
    }
}

/// Reads a calculator request as JSON and submits it through `client`.
pub async fn calculate_from_reader<R: Read>(
    client: &dyn Client,
    reader: R,
) -> Result<MetabolicResult> {
    let payload: BiometricPayload =
        serde_json::from_reader(reader).map_err(|e| Error::InputError(e.to_string()))?;
    debug!("Submitting {:?}", payload);
    client.calculate(&payload).await
}
