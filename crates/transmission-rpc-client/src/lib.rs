//! # Transmission RPC client.
//!
//! Handles the daemon's session handshake transparently: the first call of a session is
//! answered with 409 Conflict and a fresh `X-Transmission-Session-Id`, which the client stores
//! and replays the request with, once.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::{Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::from_env())?;
//!     let torrent = client.add_filename("https://example.org/file.torrent").await?;
//!     println!("Added torrent: {:?}", torrent);
//!     for torrent in client.list().await? {
//!         println!("{} {:?} {:.0}%", torrent.name, torrent.status, torrent.percent_done * 100.0);
//!     }
//!     torrent.remove(false).await?;
//!     Ok(())
//! }
//! ```
//!

mod client;
mod config;
mod ops;
mod torrent;

#[cfg(test)]
mod testutil;

// Dev-dependencies not referenced by name in unit tests.
#[cfg(test)]
use mockito as _;
#[cfg(test)]
use tracing_subscriber as _;

pub use client::{Client, WeakClient};
pub use config::ClientConfig;
pub use ops::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use torrent::Torrent;
pub use transmission_rpc_types::{
    DEFAULT_ADDRESS, RpcError, RpcRequest, SESSION_ID_HEADER, TorrentStatus,
};
