//! # Transmission RPC Types
//!
//! This crate defines the wire vocabulary of the Transmission JSON-RPC protocol: request and
//! response envelopes, the argument shapes of the supported methods, the torrent record as the
//! daemon reports it, and the error type shared by clients.

use thiserror::Error;

mod envelope;
mod torrent;

pub use envelope::{
    RpcRequest, RpcResponse, TorrentAddArgs, TorrentAdded, TorrentGetArgs, TorrentList,
    TorrentRemoveArgs,
};
pub use torrent::{TORRENT_GET_FIELDS, TorrentFields, TorrentStatus};

/// Address of a daemon running on the local machine with its stock settings.
pub const DEFAULT_ADDRESS: &str = "http://localhost:9091/transmission/rpc";

/// Header carrying the session token, in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// The `result` value of a successful response. Anything else is an error message.
pub const SUCCESS: &str = "success";

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// Network-related errors (connection failures, timeouts, unreadable response bodies)
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built locally, nothing was sent.
    #[error("request error: {0}")]
    Request(String),

    /// The daemon rejected the configured credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The response body is not a valid envelope, or its arguments have an unexpected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The daemon answered with a result other than `success`. The message is passed through
    /// verbatim.
    #[error("transmission: request response {0:?}")]
    Protocol(String),

    /// Invalid torrent file or data
    #[error("invalid torrent: {0}")]
    InvalidTorrent(String),

    /// File system errors (file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),

    /// The client configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A torrent's originating client has been dropped.
    #[error("client no longer available")]
    ClientDropped,
}

impl RpcError {
    /// The daemon's result string, if this is a protocol error.
    pub fn protocol_message(&self) -> Option<&str> {
        match self {
            Self::Protocol(msg) => Some(msg),
            _ => None,
        }
    }
}
