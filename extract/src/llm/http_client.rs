//! An HTTP client abstraction over the completion endpoints.
//!
//! Real requests go through [`ReqwestClient`]; tests swap in
//! [`MockHttpClient`] to exercise the full request/response path without a
//! network.

use std::{future::Future, pin::Pin};

use reqwest::header::HeaderMap;

/// A client for making JSON POST requests to LLM providers.
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON to `url` with the given headers.
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>>;
}

/// The production client, backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        ReqwestClient {
            client: reqwest::Client::new(),
        }
    }
}

impl HttpClient for ReqwestClient {
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>> {
        Box::pin(async move {
            self.client
                .post(url)
                .json(&body)
                .headers(headers)
                .send()
                .await
        })
    }
}

/// A mock client that answers every request with a canned, serializable
/// response body and a fixed status code.
#[derive(Debug)]
pub struct MockHttpClient<T: Send + Sync + Clone> {
    /// The HTTP status to answer with.
    pub status: u16,
    /// The body to serialize into the response.
    pub response: T,
}

impl<T: serde::Serialize + Send + Sync + Clone> MockHttpClient<T> {
    /// A mock that always succeeds with `response`.
    pub fn new(response: T) -> Self {
        Self {
            status: 200,
            response,
        }
    }

    /// A mock that answers with an arbitrary status code.
    pub fn with_status(status: u16, response: T) -> Self {
        Self { status, response }
    }
}

impl<T: serde::Serialize + Send + Sync + Clone> HttpClient for MockHttpClient<T> {
    #[allow(unused_variables)]
    fn post_json<'a, U: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a U,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>> {
        let status = self.status;
        let response = self.response.clone();

        Box::pin(async move {
            let json = serde_json::to_string(&response).unwrap();
            let bytes = bytes::Bytes::from(json);

            let http_response = http::Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(bytes)
                .unwrap();

            Ok(reqwest::Response::from(http_response))
        })
    }
}
