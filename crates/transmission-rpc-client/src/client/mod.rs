//! Transmission RPC client implementation.

use std::{
    fmt,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use transmission_rpc_types::{
    RpcError, RpcRequest, RpcResponse, TorrentAddArgs, TorrentAdded, TorrentGetArgs, TorrentList,
    TorrentRemoveArgs,
};
use url::Url;

use crate::config::ClientConfig;
use crate::ops::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::torrent::Torrent;


/// Lowercase form of [`transmission_rpc_types::SESSION_ID_HEADER`].
pub(crate) const SESSION_ID: HeaderName = HeaderName::from_static("x-transmission-session-id");

/// Client for the Transmission JSON-RPC interface.
///
/// Cloning is cheap and clones share the session token.
pub struct Client<T: HttpTransport = ReqwestTransport> {
    inner: Arc<Shared<T>>,
}

struct Shared<T> {
    transport: T,
    config: ClientConfig,
    endpoint: Url,
    /// Replaced wholesale on every 409. The lock is never held across an await.
    session_id: Mutex<Option<String>>,
}

/// A non-owning handle to a [`Client`], held by the torrents it returns.
pub struct WeakClient<T: HttpTransport = ReqwestTransport>(Weak<Shared<T>>);

impl Client {
    /// Create a new Client over the default reqwest transport.
    ///
    /// No request is sent; the session token is obtained on the first call.
    pub fn new(config: ClientConfig) -> Result<Self, RpcError> {
        let transport = ReqwestTransport::new(config.skip_check_ssl)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> Client<T> {
    /// Create a Client with a custom transport implementation.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, RpcError> {
        let endpoint = config.endpoint()?;
        debug!("Using Transmission RPC at {}", endpoint);
        Ok(Self {
            inner: Arc::new(Shared {
                transport,
                config,
                endpoint,
                session_id: Mutex::new(None),
            }),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The resolved RPC endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// The session token currently held, if any.
    pub fn session_id(&self) -> Option<String> {
        self.session().clone()
    }

    /// Whether both handles refer to the same client.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// A handle that does not keep this client alive.
    pub fn downgrade(&self) -> WeakClient<T> {
        WeakClient(Arc::downgrade(&self.inner))
    }

    /// Perform one authenticated exchange.
    ///
    /// Basic auth and the current session token are attached. If the daemon answers
    /// 409 Conflict and `allow_retry` is set, the token from the response replaces the held
    /// one and the same body is sent once more without retry. Any other status, including a
    /// second 409, is returned as is.
    pub async fn execute(
        &self,
        mut request: HttpRequest,
        allow_retry: bool,
    ) -> Result<HttpResponse, RpcError> {
        if let Some((user, password)) = self.inner.config.credentials() {
            let encoded = STANDARD.encode(format!("{user}:{password}"));
            let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
                .map_err(|e| RpcError::Request(e.to_string()))?;
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }

        // Kept aside so a retry sends the exact same bytes.
        let body = std::mem::take(&mut request.body);
        debug!("RPC request body: {}", String::from_utf8_lossy(&body));

        let mut allow_retry = allow_retry;
        loop {
            self.attach_session_id(&mut request.headers)?;
            let response = self
                .inner
                .transport
                .send(HttpRequest {
                    url: request.url.clone(),
                    headers: request.headers.clone(),
                    body: body.clone(),
                })
                .await?;

            if response.status != StatusCode::CONFLICT || !allow_retry {
                return Ok(response);
            }

            self.store_session_id(&response.headers);
            allow_retry = false;
        }
    }

    /// Serialize `request` and POST it to the endpoint, retrying once on 409.
    pub async fn post(&self, request: &RpcRequest) -> Result<HttpResponse, RpcError> {
        let body = serde_json::to_vec(request).map_err(|e| RpcError::Request(e.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        self.execute(
            HttpRequest {
                url: self.inner.endpoint.clone(),
                headers,
                body,
            },
            true,
        )
        .await
    }

    /// Call `request` and decode the result arguments into `A`.
    pub async fn request<A>(&self, request: &RpcRequest) -> Result<A, RpcError>
    where
        A: DeserializeOwned + Default,
    {
        debug!("Calling {}", request.method());
        let response = self.post(request).await?;

        match response.status {
            StatusCode::CONFLICT => {
                warn!("Session id rejected again after refresh");
                Err(RpcError::Protocol(response.status.to_string()))
            }
            StatusCode::UNAUTHORIZED => Err(RpcError::Unauthorized),
            _ => RpcResponse::from_slice(&response.body)?.into_result(),
        }
    }

    /// List all torrents.
    pub async fn list(&self) -> Result<Vec<Torrent<T>>, RpcError> {
        debug!("Listing torrents");
        let list: TorrentList = self
            .request(&RpcRequest::TorrentGet(TorrentGetArgs::all()))
            .await?;

        let handle = self.downgrade();
        let torrents: Vec<_> = list
            .torrents
            .into_iter()
            .map(|fields| Torrent::bind(fields, handle.clone()))
            .collect();
        debug!("Listed {} torrents", torrents.len());

        Ok(torrents)
    }

    /// Add a torrent from a path or URL (`filename`) or from base64 `.torrent` content
    /// (`metainfo`). Set exactly one of them.
    pub async fn add(
        &self,
        filename: Option<&str>,
        metainfo: Option<&str>,
    ) -> Result<Torrent<T>, RpcError> {
        debug!("Adding torrent, filename={filename:?}");
        let added: TorrentAdded = self
            .request(&RpcRequest::TorrentAdd(TorrentAddArgs {
                filename: filename.map(str::to_owned),
                metainfo: metainfo.map(str::to_owned),
            }))
            .await?;

        let fields = added
            .torrent
            .ok_or_else(|| RpcError::InvalidTorrent("No torrent returned".into()))?;
        debug!("Added torrent {} ({})", fields.id, fields.name);

        Ok(Torrent::bind(fields, self.downgrade()))
    }

    /// Add a torrent by path or URL as seen by the daemon, or a magnet link.
    pub async fn add_filename(&self, filename: &str) -> Result<Torrent<T>, RpcError> {
        self.add(Some(filename), None).await
    }

    /// Add a local `.torrent` file by uploading its content.
    pub async fn add_file(&self, path: impl AsRef<Path>) -> Result<Torrent<T>, RpcError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| RpcError::FileSystem(format!("{}: {}", path.display(), e)))?;

        let metainfo = STANDARD.encode(content);
        self.add(None, Some(metainfo.as_str())).await
    }

    /// Remove torrents. If `delete_local_data` is true, the downloaded data is deleted too.
    pub async fn remove(
        &self,
        torrents: &[Torrent<T>],
        delete_local_data: bool,
    ) -> Result<(), RpcError> {
        let ids: Vec<i64> = torrents.iter().map(|t| t.id).collect();
        self.remove_ids(&ids, delete_local_data).await
    }

    /// Remove torrents by id.
    pub async fn remove_ids(&self, ids: &[i64], delete_local_data: bool) -> Result<(), RpcError> {
        debug!("Removing torrents {ids:?}, delete_local_data={delete_local_data}");
        let _: serde_json::Value = self
            .request(&RpcRequest::TorrentRemove(TorrentRemoveArgs {
                ids: ids.to_vec(),
                delete_local_data,
            }))
            .await?;
        debug!("Remove command sent");
        Ok(())
    }

    fn session(&self) -> MutexGuard<'_, Option<String>> {
        self.inner
            .session_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn attach_session_id(&self, headers: &mut HeaderMap) -> Result<(), RpcError> {
        match self.session().as_deref() {
            Some(id) => {
                let value =
                    HeaderValue::from_str(id).map_err(|e| RpcError::Request(e.to_string()))?;
                headers.insert(SESSION_ID, value);
            }
            None => {
                headers.remove(SESSION_ID);
            }
        }
        Ok(())
    }

    fn store_session_id(&self, headers: &HeaderMap) {
        let id = headers
            .get(SESSION_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        if id.is_none() {
            warn!("409 response without a session id");
        } else {
            debug!("Session id refreshed");
        }
        *self.session() = id;
    }
}

impl<T: HttpTransport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: HttpTransport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .field("has_session_id", &self.session().is_some())
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> WeakClient<T> {
    /// The client, if it is still alive.
    pub fn upgrade(&self) -> Option<Client<T>> {
        self.0.upgrade().map(|inner| Client { inner })
    }

    /// Whether this handle points at `client`.
    pub fn points_to(&self, client: &Client<T>) -> bool {
        Weak::ptr_eq(&self.0, &Arc::downgrade(&client.inner))
    }
}

impl<T: HttpTransport> Clone for WeakClient<T> {
    fn clone(&self) -> Self {
        Self(Weak::clone(&self.0))
    }
}

impl<T: HttpTransport> fmt::Debug for WeakClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakClient")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}
