//! Torrents bound to the client that reported them.

use std::fmt;

use transmission_rpc_types::{RpcError, TorrentFields, TorrentStatus};

use crate::client::{Client, WeakClient};
use crate::ops::{HttpTransport, ReqwestTransport};

/// Torrent information, with a weak reference to the client it came from.
///
/// The reference does not keep the client alive. Follow-up calls such as [`Torrent::remove`]
/// fail with [`RpcError::ClientDropped`] once every [`Client`] handle is gone.
#[allow(missing_docs)] // rationale: same fields as TorrentFields
pub struct Torrent<T: HttpTransport = ReqwestTransport> {
    pub id: i64,

    pub name: String,

    pub status: TorrentStatus,

    pub hash_string: String,

    pub percent_done: f64,

    pub total_size: i64,

    pub download_dir: String,

    pub added_date: i64,

    pub eta: i64,

    pub rate_download: i64,

    pub rate_upload: i64,

    pub upload_ratio: f64,

    pub is_finished: bool,

    pub error: i64,

    pub error_string: String,

    client: WeakClient<T>,
}

impl<T: HttpTransport> Torrent<T> {
    pub(crate) fn bind(fields: TorrentFields, client: WeakClient<T>) -> Self {
        Self {
            id: fields.id,
            name: fields.name,
            status: fields.status,
            hash_string: fields.hash_string,
            percent_done: fields.percent_done,
            total_size: fields.total_size,
            download_dir: fields.download_dir,
            added_date: fields.added_date,
            eta: fields.eta,
            rate_download: fields.rate_download,
            rate_upload: fields.rate_upload,
            upload_ratio: fields.upload_ratio,
            is_finished: fields.is_finished,
            error: fields.error,
            error_string: fields.error_string,
            client,
        }
    }

    /// The client that returned this torrent, if it is still alive.
    pub fn client(&self) -> Option<Client<T>> {
        self.client.upgrade()
    }

    /// Whether this torrent was returned by `client`.
    pub fn belongs_to(&self, client: &Client<T>) -> bool {
        self.client.points_to(client)
    }

    /// Remove this torrent through the client that returned it.
    pub async fn remove(&self, delete_local_data: bool) -> Result<(), RpcError> {
        let client = self.client().ok_or(RpcError::ClientDropped)?;
        client.remove_ids(&[self.id], delete_local_data).await
    }
}

impl<T: HttpTransport> Clone for Torrent<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            hash_string: self.hash_string.clone(),
            download_dir: self.download_dir.clone(),
            error_string: self.error_string.clone(),
            client: self.client.clone(),
            ..*self
        }
    }
}

impl<T: HttpTransport> fmt::Debug for Torrent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Torrent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("status", &self.status)
            .field("hash_string", &self.hash_string)
            .field("percent_done", &self.percent_done)
            .field("total_size", &self.total_size)
            .field("download_dir", &self.download_dir)
            .field("is_finished", &self.is_finished)
            .field("error_string", &self.error_string)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
