//! Integration test for the Client with a chained sequence: add -> list -> remove.
//! Requires a running Transmission daemon and environment configuration:
//! - TRANSMISSION_RPC_URL (default: http://localhost:9091/transmission/rpc)
//! - TRANSMISSION_USER / TRANSMISSION_PASSWORD (optional)
//! - TRANSMISSION_TEST_TORRENT: path or URL of a torrent the daemon can load
//!
//! Run with `cargo test -- --ignored`.

#![allow(unused_crate_dependencies)]
#![allow(missing_docs)]

use std::env;

use transmission_rpc_client::{Client, ClientConfig};

fn test_torrent() -> String {
    env::var("TRANSMISSION_TEST_TORRENT").unwrap_or_else(|_| {
        "https://releases.ubuntu.com/24.04/ubuntu-24.04-live-server-amd64.iso.torrent".into()
    })
}

#[ignore = "requires a running transmission-daemon"]
#[test_log::test(tokio::test)]
async fn transmission_client_chained_flow() {
    // Arrange client
    let client =
        Client::new(ClientConfig::from_env()).expect("failed to initialize Transmission client");

    // 1. Add torrent
    let added = client
        .add_filename(&test_torrent())
        .await
        .expect("failed to add torrent");
    assert!(added.belongs_to(&client));

    // 2. List torrents, find ours by id or hash
    let list = client.list().await.expect("failed to list torrents");
    let t = list
        .iter()
        .find(|t| t.id == added.id || t.hash_string == added.hash_string)
        .expect("added torrent not found in list");
    assert!(t.belongs_to(&client));

    // 3. The handshake happened on the first call
    assert!(client.session_id().is_some());

    // 4. Remove through the back-reference, keeping local data
    t.remove(false).await.expect("failed to remove torrent");

    // 5. Ensure our torrent is gone
    let final_list = client.list().await.expect("failed to list torrents");
    let still_present = final_list
        .iter()
        .any(|t| t.id == added.id || t.hash_string == added.hash_string);
    assert!(!still_present, "torrent was not removed");
}

#[ignore = "requires a running transmission-daemon"]
#[tokio::test]
async fn transmission_client_list() {
    let client = Client::new(ClientConfig::from_env()).unwrap();

    let torrents = client.list().await.unwrap();
    for torrent in &torrents {
        assert!(torrent.client().is_some_and(|c| c.ptr_eq(&client)));
    }
}
