//! Request and response envelopes.
//!
//! Every call is a JSON object `{"method": ..., "arguments": {...}}` and every answer is
//! `{"result": ..., "arguments": {...}}`. The supported methods form a closed set, so the
//! outgoing envelope is an enum tagged by method name.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{RpcError, SUCCESS, TORRENT_GET_FIELDS, TorrentFields};

/// An outgoing RPC call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "arguments", rename_all = "kebab-case")]
pub enum RpcRequest {
    /// `torrent-get`
    TorrentGet(TorrentGetArgs),
    /// `torrent-add`
    TorrentAdd(TorrentAddArgs),
    /// `torrent-remove`
    TorrentRemove(TorrentRemoveArgs),
}

impl RpcRequest {
    /// The wire name of the method.
    pub fn method(&self) -> &'static str {
        match self {
            Self::TorrentGet(_) => "torrent-get",
            Self::TorrentAdd(_) => "torrent-add",
            Self::TorrentRemove(_) => "torrent-remove",
        }
    }
}

/// Arguments of `torrent-get`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentGetArgs {
    /// Keys to report for each torrent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    /// Restrict the listing to these torrent ids. All torrents when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
}

impl TorrentGetArgs {
    /// Every torrent, with the fields [`TorrentFields`] decodes.
    pub fn all() -> Self {
        Self {
            fields: TORRENT_GET_FIELDS.iter().map(|f| f.to_string()).collect(),
            ids: None,
        }
    }
}

/// Arguments of `torrent-add`.
///
/// `filename` and `metainfo` are alternatives; the daemon decides what happens if both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentAddArgs {
    /// Path or URL of a `.torrent` file, or a magnet link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Base64-encoded `.torrent` content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metainfo: Option<String>,
}

/// Arguments of `torrent-remove`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentRemoveArgs {
    /// Torrent ids, sent as decimal strings.
    #[serde(with = "ids_as_strings")]
    pub ids: Vec<i64>,
    /// Also delete the downloaded data.
    #[serde(
        rename = "delete-local-data",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub delete_local_data: bool,
}

/// Result arguments of `torrent-get`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TorrentList {
    /// The reported torrents.
    #[serde(default)]
    pub torrents: Vec<TorrentFields>,
}

/// Result arguments of `torrent-add`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TorrentAdded {
    /// The new torrent, or the existing one when it was already present.
    #[serde(default, rename = "torrent-added", alias = "torrent-duplicate")]
    pub torrent: Option<TorrentFields>,
}

/// An incoming RPC answer.
///
/// `arguments` is kept untyped until `result` has been checked, so a failure message always
/// surfaces as [`RpcError::Protocol`] whatever the daemon put next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// `"success"` or an error message.
    pub result: String,
    /// Method-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

impl RpcResponse {
    /// Parse an envelope from a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RpcError> {
        serde_json::from_slice(body).map_err(|e| RpcError::Decode(e.to_string()))
    }

    /// Whether the daemon reported success.
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS
    }

    /// Check the result marker and shape the arguments into `A`.
    ///
    /// Missing or `null` arguments decode as `A::default()`.
    pub fn into_result<A>(self) -> Result<A, RpcError>
    where
        A: DeserializeOwned + Default,
    {
        if !self.is_success() {
            return Err(RpcError::Protocol(self.result));
        }
        match self.arguments {
            None | Some(serde_json::Value::Null) => Ok(A::default()),
            Some(value) => {
                serde_json::from_value(value).map_err(|e| RpcError::Decode(e.to_string()))
            }
        }
    }
}

mod ids_as_strings {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(ids: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(ids.iter().map(|id| id.to_string()))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<i64>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|id| id.parse::<i64>().map_err(D::Error::custom))
            .collect()
    }
}
