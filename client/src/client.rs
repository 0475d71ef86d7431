//! Todo API client implementation

use crate::error::ClientError;
use reqwest::{Client, Response, StatusCode, Url};
use todo_api_core::{ProblemDetails, Todo, TodoId, TodoPayload};

/// Typed client for the Todo API.
///
/// Paths are resolved against the base address the way a browser resolves
/// relative links, so a base of `http://host/app/` targets
/// `http://host/app/api/todos`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    client: Client,
    base: Url,
}

impl PartialEq for TodoClient {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl TodoClient {
    /// Create a client for the API served at `base`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseAddress` if `base` is not an absolute URL
    pub fn new(base: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseAddress` if `base` is not an absolute URL
    pub fn with_client(client: Client, base: &str) -> Result<Self, ClientError> {
        let mut base =
            Url::parse(base).map_err(|_| ClientError::InvalidBaseAddress(base.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseAddress(base.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    /// The base address every path is resolved against.
    #[must_use]
    pub const fn base_address(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|e| ClientError::RequestFailed(e.to_string()))
    }

    /// List every todo.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self.send(self.client.get(self.url("api/todos")?)).await?;

        match response.status() {
            StatusCode::OK => parse(response).await,
            _ => Err(api_error(response).await),
        }
    }

    /// Fetch one todo; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn get(&self, id: TodoId) -> Result<Option<Todo>, ClientError> {
        let url = self.url(&format!("api/todos/{id}"))?;
        let response = self.send(self.client.get(url)).await?;

        match response.status() {
            StatusCode::OK => parse(response).await.map(Some),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(api_error(response).await),
        }
    }

    /// Create a todo and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` when the API rejects the payload,
    /// otherwise errors for network failures, API errors, or parsing failures
    pub async fn create(&self, payload: &TodoPayload) -> Result<Todo, ClientError> {
        let response = self
            .send(self.client.post(self.url("api/todos")?).json(payload))
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => parse(response).await,
            StatusCode::BAD_REQUEST => match response.json::<ProblemDetails>().await {
                Ok(problem) => Err(ClientError::Validation(problem)),
                Err(e) => Err(ClientError::ResponseParseFailed(e.to_string())),
            },
            _ => Err(api_error(response).await),
        }
    }

    /// Delete a todo, returning its last value; `Ok(None)` when it did not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn delete(&self, id: TodoId) -> Result<Option<Todo>, ClientError> {
        let url = self.url(&format!("todos/{id}"))?;
        let response = self.send(self.client.delete(url)).await?;

        match response.status() {
            StatusCode::OK => parse(response).await.map(Some),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(api_error(response).await),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        tracing::debug!(status = %response.status(), url = %response.url(), "Todo API response");
        Ok(response)
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProblemDetails>(&body)
        .ok()
        .map_or(body, |problem| problem.detail.unwrap_or(problem.title));

    ClientError::ApiError { status, message }
}
