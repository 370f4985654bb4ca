use serde::{Deserialize, Serialize};

/// Keys requested by `torrent-get`, one per field of [`TorrentFields`].
pub const TORRENT_GET_FIELDS: &[&str] = &[
    "id",
    "name",
    "status",
    "hashString",
    "percentDone",
    "totalSize",
    "downloadDir",
    "addedDate",
    "eta",
    "rateDownload",
    "rateUpload",
    "uploadRatio",
    "isFinished",
    "error",
    "errorString",
];

/// Torrent information as reported by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct TorrentFields {
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
}

/// Activity state of a torrent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TorrentStatus {
    /// Paused.
    #[default]
    Stopped,
    /// Waiting for a local data check.
    QueuedToVerify,
    /// Checking local data.
    Verifying,
    /// Waiting for a download slot.
    QueuedToDownload,
    /// Downloading.
    Downloading,
    /// Waiting for a seeding slot.
    QueuedToSeed,
    /// Seeding.
    Seeding,
    /// A code this client does not know.
    Unknown(i64),
}

impl From<i64> for TorrentStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Stopped,
            1 => Self::QueuedToVerify,
            2 => Self::Verifying,
            3 => Self::QueuedToDownload,
            4 => Self::Downloading,
            5 => Self::QueuedToSeed,
            6 => Self::Seeding,
            other => Self::Unknown(other),
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::QueuedToVerify => 1,
            TorrentStatus::Verifying => 2,
            TorrentStatus::QueuedToDownload => 3,
            TorrentStatus::Downloading => 4,
            TorrentStatus::QueuedToSeed => 5,
            TorrentStatus::Seeding => 6,
            TorrentStatus::Unknown(code) => code,
        }
    }
}
