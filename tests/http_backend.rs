//! Drives the real reqwest transport against a loopback server.

use assert_cmd::Command;
use chainctl::api::ChainsApi;
use chainctl::client::http::ReqwestClient;
use chainctl::error::ChainError;
use chainctl::model::ChainType;
use chainctl::presenters::{ChainPresenters, TableRenderer};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    url: String,
    body: String,
}

struct Backend {
    base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
    handle: JoinHandle<()>,
}

impl Backend {
    /// Serves exactly `requests` requests, answering each with `respond`.
    fn start<F>(requests: usize, respond: F) -> Self
    where
        F: Fn(&Seen) -> (u16, String) + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        let handle = thread::spawn(move || {
            for _ in 0..requests {
                let mut request = server.recv().unwrap();
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();
                let entry = Seen {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body,
                };
                let (status, payload) = respond(&entry);
                log.lock().unwrap().push(entry);
                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"application/vnd.api+json"[..],
                )
                .unwrap();
                let response = tiny_http::Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(header);
                request.respond(response).unwrap();
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            seen,
            handle,
        }
    }

    fn finish(self) -> Vec<Seen> {
        self.handle.join().unwrap();
        let seen = self.seen.lock().unwrap();
        seen.clone()
    }
}

fn resource(id: &str, enabled: bool, config: Value) -> Value {
    json!({
        "type": "solana_chain",
        "id": id,
        "attributes": {
            "enabled": enabled,
            "config": config,
            "createdAt": "2021-11-02T10:00:00Z",
            "updatedAt": "2021-11-03T12:30:00Z"
        }
    })
}

fn api(base_url: &str) -> ChainsApi<ReqwestClient> {
    let client = ReqwestClient::new(base_url, None).unwrap();
    ChainsApi::new(client, ChainType::default())
}

#[test]
fn list_page_renders_header_and_rows_in_order() {
    let backend = Backend::start(1, |_| {
        let doc = json!({
            "data": [
                resource("devnet", true, json!({"url": "http://a"})),
                resource("testnet", false, json!({}))
            ],
            "links": {"prev": "/v2/chains/solana?page=1"},
            "meta": {"count": 27}
        });
        (200, doc.to_string())
    });

    let result = api(&backend.base_url).list_chains(2).unwrap();
    let seen = backend.finish();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/v2/chains/solana?page=2");

    let page = result.page.unwrap();
    assert_eq!(page.page, 2);
    assert!(page.has_prev());
    assert!(!page.has_next());

    let mut out = Vec::new();
    ChainPresenters::from(&page).render_table(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0].split_whitespace().collect::<Vec<_>>(),
        ["ID", "Enabled", "Config", "Created", "Updated"]
    );
    assert!(lines[2].starts_with("devnet"));
    let testnet = lines.iter().position(|l| l.starts_with("testnet")).unwrap();
    assert!(testnet > 2);
    assert!(lines[testnet].contains("false"));
}

#[test]
fn configure_sends_merged_config_with_current_enabled_flag() {
    let backend = Backend::start(2, |seen| match seen.method.as_str() {
        "GET" => {
            let current = resource("devnet", false, json!({"url": "http://a", "timeout": 10}));
            (200, json!({ "data": current }).to_string())
        }
        _ => {
            let sent: Value = serde_json::from_str(&seen.body).unwrap();
            let updated = resource("devnet", false, sent["config"].clone());
            (200, json!({ "data": updated }).to_string())
        }
    });

    let result = api(&backend.base_url)
        .configure_chain("devnet", &["url=http://b", "extra=[1,2]"])
        .unwrap();
    let seen = backend.finish();

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].url, "/v2/chains/solana/devnet");
    assert_eq!(seen[1].method, "PATCH");
    assert_eq!(seen[1].url, "/v2/chains/solana/devnet");
    let sent: Value = serde_json::from_str(&seen[1].body).unwrap();
    assert_eq!(
        sent,
        json!({
            "enabled": false,
            "config": {"url": "http://b", "timeout": 10, "extra": [1, 2]}
        })
    );
    assert_eq!(result.affected_chains[0].config["url"], json!("http://b"));
}

#[test]
fn create_posts_chain_id_and_config() {
    let backend = Backend::start(1, |seen| {
        let sent: Value = serde_json::from_str(&seen.body).unwrap();
        let id = sent["chainID"].as_str().unwrap_or_default().to_string();
        (201, json!({ "data": resource(&id, true, sent["config"].clone()) }).to_string())
    });

    let result = api(&backend.base_url)
        .create_chain("mainnet", Some(json!({"url": "http://m"})))
        .unwrap();
    let seen = backend.finish();

    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].url, "/v2/chains/solana");
    assert_eq!(result.affected_chains[0].id, "mainnet");
}

#[test]
fn chain_ids_are_sent_as_a_single_encoded_segment() {
    let backend = Backend::start(3, |_| (204, String::new()));
    let api = api(&backend.base_url);

    let result = api.remove_chain("devnet#x").unwrap();
    assert_eq!(result.messages[0].content, "Chain devnet#x deleted");
    api.remove_chain("../../evm/1").unwrap();
    api.remove_chain("devnet?x=1").unwrap();

    let urls: Vec<String> = backend.finish().into_iter().map(|s| s.url).collect();
    assert_eq!(
        urls,
        [
            "/v2/chains/solana/devnet%23x",
            "/v2/chains/solana/..%2F..%2Fevm%2F1",
            "/v2/chains/solana/devnet%3Fx%3D1",
        ]
    );
}

#[test]
fn backend_error_details_are_surfaced() {
    let backend = Backend::start(1, |_| {
        (404, json!({"errors": [{"detail": "chain not found"}]}).to_string())
    });

    let err = api(&backend.base_url).remove_chain("ghost").unwrap_err();
    backend.finish();
    match err {
        ChainError::Backend { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "chain not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn binary_lists_chains_from_configured_url() {
    let backend = Backend::start(1, |_| {
        let doc = json!({
            "data": [resource("devnet", true, json!({"url": "http://a"}))],
            "links": {"next": "/v2/chains/solana?page=2"}
        });
        (200, doc.to_string())
    });
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("chainctl")
        .unwrap()
        .env("CHAINCTL_CONFIG_DIR", dir.path())
        .env("CHAINCTL_URL", &backend.base_url)
        .env_remove("CHAINCTL_CHAIN_TYPE")
        .args(["list", "--page", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("devnet"))
        .stdout(predicate::str::contains("\"url\": \"http://a\""))
        .stdout(predicate::str::contains("use --page 2"));

    let seen = backend.finish();
    assert_eq!(seen[0].url, "/v2/chains/solana?page=1");
}
