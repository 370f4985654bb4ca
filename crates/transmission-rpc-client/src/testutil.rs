//! Shared test utilities and fixtures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::{
    StatusCode,
    header::{HeaderMap, HeaderValue},
};
use serde_json::{Value, json};
use transmission_rpc_types::{RpcError, TorrentFields, TorrentStatus};

use crate::client::{Client, SESSION_ID};
use crate::config::ClientConfig;
use crate::ops::{HttpRequest, HttpResponse, MockHttpTransport};

/// Requests seen by a scripted mock, in order.
pub(crate) type Sent = Arc<Mutex<Vec<HttpRequest>>>;

pub(crate) fn make_test_client(mock: MockHttpTransport) -> Client<MockHttpTransport> {
    Client::with_transport(ClientConfig::default(), mock).unwrap()
}

pub(crate) fn make_test_fields(id: i64, name: &str, hash: &str) -> TorrentFields {
    TorrentFields {
        id,
        name: name.to_string(),
        status: TorrentStatus::Downloading,
        hash_string: hash.to_string(),
        percent_done: 0.5,
        total_size: 1000,
        download_dir: "/downloads".to_string(),
        ..Default::default()
    }
}

pub(crate) fn make_test_torrent_json(id: i64, name: &str, hash: &str) -> Value {
    serde_json::to_value(make_test_fields(id, name, hash)).unwrap()
}

/// A 200 response carrying `{"result": "success", "arguments": arguments}`.
pub(crate) fn success(arguments: Value) -> HttpResponse {
    envelope(json!({"result": "success", "arguments": arguments}))
}

/// A 200 response carrying an arbitrary envelope.
pub(crate) fn envelope(body: Value) -> HttpResponse {
    HttpResponse {
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body: body.to_string().into_bytes(),
    }
}

/// The daemon's "send me your session id" answer.
pub(crate) fn conflict(session_id: Option<&str>) -> HttpResponse {
    let mut headers = HeaderMap::new();
    if let Some(id) = session_id {
        headers.insert(SESSION_ID, HeaderValue::from_str(id).unwrap());
    }
    HttpResponse {
        status: StatusCode::CONFLICT,
        headers,
        body: b"<h1>409: Conflict</h1>".to_vec(),
    }
}

pub(crate) fn status(status: StatusCode, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HeaderMap::new(),
        body: body.as_bytes().to_vec(),
    }
}

/// A mock that answers with `responses` in order, recording each request.
/// Panics if called more often than there are responses.
pub(crate) fn scripted(
    responses: Vec<Result<HttpResponse, RpcError>>,
) -> (MockHttpTransport, Sent) {
    let sent: Sent = Arc::default();
    let recorder = Arc::clone(&sent);
    let mut queue: VecDeque<_> = responses.into();

    let mut mock = MockHttpTransport::new();
    mock.expect_send()
        .times(queue.len())
        .returning(move |request| {
            recorder.lock().unwrap().push(request);
            queue.pop_front().unwrap()
        });

    (mock, sent)
}

pub(crate) fn session_header(request: &HttpRequest) -> Option<&str> {
    request
        .headers
        .get(SESSION_ID)
        .map(|v| v.to_str().unwrap())
}

pub(crate) fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}
