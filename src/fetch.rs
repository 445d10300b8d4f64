//! HTTP client abstraction for making requests to the Saveurs API

use reqwest::{Client, RequestBuilder, Method, header::{HeaderMap, HeaderValue}};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use crate::error::Error;
use url::Url;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        // Query values are percent-encoded by the Url query builder
        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Send the request and check the response status, turning any
    /// non-2xx outcome into an [`Error::Api`]
    async fn send(&self) -> Result<reqwest::Response, Error> {
        let req = self.build()?;
        let response = req.send().await.map_err(|err| self.log_failure(err))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = Self::error_message(status.as_u16(), &text);
            return Err(self.log_failure(Error::api(status.as_u16(), message)));
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.send().await?;
        let result = response
            .json::<T>()
            .await
            .map_err(|err| self.log_failure(err))?;
        Ok(result)
    }

    /// Execute the request, yielding `None` for a 204 No Content response
    /// instead of attempting to parse a body
    pub async fn execute_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        let response = self.send().await?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let result = response
            .json::<T>()
            .await
            .map_err(|err| self.log_failure(err))?;
        Ok(Some(result))
    }

    /// Execute the request and discard the response body
    pub async fn execute_ack(&self) -> Result<(), Error> {
        self.send().await?;
        Ok(())
    }

    /// Extract the server-supplied error message from a response body,
    /// falling back to a generic status-coded message
    fn error_message(status: u16, body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("API error: {}", status))
    }

    /// Log the failure context for a request, then hand the error back
    /// unchanged for the caller to propagate
    fn log_failure<E: Into<Error>>(&self, err: E) -> Error {
        let err = err.into();
        log::error!("{} {} failed: {}", self.method, self.url, err);
        err
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
