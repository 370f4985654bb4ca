//! HTTP seam between the RPC client and the network.
//!
//! This module provides the [`HttpTransport`] trait which abstracts the underlying
//! HTTP client, enabling mocking in tests. The client only ever needs "send these bytes,
//! give me the status, headers and body back"; pooling, TLS and proxies live below it.

use async_trait::async_trait;
use reqwest::{StatusCode, header::HeaderMap};
use transmission_rpc_types::RpcError;
use url::Url;

/// An outbound POST.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Target endpoint.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Serialized envelope.
    pub body: Vec<u8>,
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

/// Trait that abstracts the HTTP exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and read the whole response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RpcError>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the transport. With `skip_check_ssl` server certificates are not verified.
    pub fn new(skip_check_ssl: bool) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(skip_check_ssl)
            .build()
            .map_err(|e| RpcError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RpcError> {
        let response = self
            .client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Maps reqwest errors to RPC errors.
fn map_reqwest_error(err: reqwest::Error) -> RpcError {
    if err.is_builder() {
        RpcError::Request(err.to_string())
    } else {
        RpcError::Network(err.to_string())
    }
}
