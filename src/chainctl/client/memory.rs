//! In-memory stand-in for the backend's chain routes.
//!
//! Serves the same JSON:API documents the real node does, so commands can be
//! tested end to end without a network. Every request is recorded, and faults can
//! be injected: a failed send, a response whose close fails, or a forced error
//! status.

use super::{BufferedBody, HttpClient, Response};
use crate::error::{ChainError, Result};
use crate::model::{
    ChainResource, ChainType, ConfigDocument, CreateChainRequest, Document, DocumentMeta,
    ErrorDocument, ErrorObject, PageLinks, ResourceObject, UpdateChainRequest,
};
use chrono::Utc;
use serde::Serialize;
use std::cell::RefCell;

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
struct Faults {
    send: Option<String>,
    close: Vec<(Method, String)>,
    status: Vec<(Method, u16, String)>,
}

pub struct InMemoryBackend {
    chain_type: ChainType,
    page_size: usize,
    chains: RefCell<Vec<ChainResource>>,
    requests: RefCell<Vec<RecordedRequest>>,
    faults: RefCell<Faults>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(ChainType::default())
    }
}

impl InMemoryBackend {
    pub fn new(chain_type: ChainType) -> Self {
        Self {
            chain_type,
            page_size: DEFAULT_PAGE_SIZE,
            chains: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
            faults: RefCell::new(Faults::default()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_chain(self, id: &str, config: serde_json::Value) -> Self {
        let config = match config {
            serde_json::Value::Object(map) => map,
            _ => ConfigDocument::new(),
        };
        self.chains
            .borrow_mut()
            .push(ChainResource::new(id.to_string(), config));
        self
    }

    pub fn with_disabled_chain(self, id: &str, config: serde_json::Value) -> Self {
        let this = self.with_chain(id, config);
        if let Some(chain) = this.chains.borrow_mut().last_mut() {
            chain.enabled = false;
        }
        this
    }

    /// The next request fails before reaching the backend.
    pub fn fail_next_send(&self, message: &str) {
        self.faults.borrow_mut().send = Some(message.to_string());
    }

    /// The next response to `method` fails when its body is closed.
    pub fn fail_close(&self, method: Method, message: &str) {
        self.faults
            .borrow_mut()
            .close
            .push((method, message.to_string()));
    }

    /// The next request with `method` is answered with `status` and an error body.
    pub fn respond_with_status(&self, method: Method, status: u16, detail: &str) {
        self.faults
            .borrow_mut()
            .status
            .push((method, status, detail.to_string()));
    }

    pub fn chains(&self) -> Vec<ChainResource> {
        self.chains.borrow().clone()
    }

    pub fn chain(&self, id: &str) -> Option<ChainResource> {
        self.chains.borrow().iter().find(|c| c.id == id).cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn handle(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        if let Some(message) = self.faults.borrow_mut().send.take() {
            return Err(ChainError::Transport(message));
        }

        let parsed_body = body
            .as_deref()
            .and_then(|b| serde_json::from_slice::<serde_json::Value>(b).ok());
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: parsed_body,
        });

        let forced = {
            let mut faults = self.faults.borrow_mut();
            let pos = faults.status.iter().position(|(m, _, _)| *m == method);
            pos.map(|i| faults.status.remove(i))
        };
        let (status, payload) = match forced {
            Some((_, status, detail)) => (status, error_body(&detail)),
            None => self.route(method, path, body.as_deref()),
        };

        let mut response_body = BufferedBody::new(payload);
        {
            let mut faults = self.faults.borrow_mut();
            if let Some(i) = faults.close.iter().position(|(m, _)| *m == method) {
                let (_, message) = faults.close.remove(i);
                response_body = response_body.failing_close(message);
            }
        }
        Ok(Response::new(status, Box::new(response_body)))
    }

    fn route(&self, method: Method, path: &str, body: Option<&[u8]>) -> (u16, Vec<u8>) {
        let (route, query) = path.split_once('?').unwrap_or((path, ""));
        let collection = self.chain_type.collection_path();
        let Some(rest) = route.strip_prefix(&collection) else {
            return (404, error_body(&format!("no route for {}", route)));
        };

        let id = rest.strip_prefix('/').map(|segment| {
            urlencoding::decode(segment)
                .map(|id| id.into_owned())
                .unwrap_or_else(|_| segment.to_string())
        });
        match (method, id.as_deref()) {
            (Method::Get, None) if rest.is_empty() => self.list(query),
            (Method::Post, None) if rest.is_empty() => self.create(body),
            (Method::Get, Some(id)) => self.show(id),
            (Method::Patch, Some(id)) => self.update(id, body),
            (Method::Delete, Some(id)) => self.remove(id),
            _ => (405, error_body("method not allowed")),
        }
    }

    fn list(&self, query: &str) -> (u16, Vec<u8>) {
        let page = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "page")
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);

        let chains = self.chains.borrow();
        let kind = self.chain_type.resource_kind();
        let start = (page - 1) * self.page_size;
        let data: Vec<ResourceObject> = chains
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|c| c.to_resource_object(&kind))
            .collect();

        let collection = self.chain_type.collection_path();
        let links = PageLinks {
            next: (start + self.page_size < chains.len())
                .then(|| format!("{}?page={}&size={}", collection, page + 1, self.page_size)),
            prev: (page > 1)
                .then(|| format!("{}?page={}&size={}", collection, page - 1, self.page_size)),
        };
        let doc = Document {
            data,
            links: Some(links),
            meta: Some(DocumentMeta {
                count: Some(chains.len() as u64),
            }),
        };
        (200, encode(&doc))
    }

    fn create(&self, body: Option<&[u8]>) -> (u16, Vec<u8>) {
        let request = match body.map(serde_json::from_slice::<CreateChainRequest>) {
            Some(Ok(request)) => request,
            _ => return (400, error_body("invalid request body")),
        };
        let serde_json::Value::Object(config) = request.config else {
            return (422, error_body("config must be a JSON object"));
        };
        if self.chain(&request.chain_id).is_some() {
            return (
                409,
                error_body(&format!("chain {} already exists", request.chain_id)),
            );
        }
        let chain = ChainResource::new(request.chain_id, config);
        self.chains.borrow_mut().push(chain.clone());
        (201, self.single(&chain))
    }

    fn show(&self, id: &str) -> (u16, Vec<u8>) {
        match self.chain(id) {
            Some(chain) => (200, self.single(&chain)),
            None => not_found(id),
        }
    }

    fn update(&self, id: &str, body: Option<&[u8]>) -> (u16, Vec<u8>) {
        let request = match body.map(serde_json::from_slice::<UpdateChainRequest>) {
            Some(Ok(request)) => request,
            _ => return (400, error_body("invalid request body")),
        };
        let mut chains = self.chains.borrow_mut();
        let Some(chain) = chains.iter_mut().find(|c| c.id == id) else {
            return not_found(id);
        };
        chain.enabled = request.enabled;
        chain.config = request.config;
        chain.updated_at = Utc::now();
        let updated = chain.clone();
        drop(chains);
        (200, self.single(&updated))
    }

    fn remove(&self, id: &str) -> (u16, Vec<u8>) {
        let mut chains = self.chains.borrow_mut();
        match chains.iter().position(|c| c.id == id) {
            Some(i) => {
                chains.remove(i);
                (204, Vec::new())
            }
            None => not_found(id),
        }
    }

    fn single(&self, chain: &ChainResource) -> Vec<u8> {
        let doc = Document {
            data: chain.to_resource_object(&self.chain_type.resource_kind()),
            links: None,
            meta: None,
        };
        encode(&doc)
    }
}

impl HttpClient for InMemoryBackend {
    fn get(&self, path: &str) -> Result<Response> {
        self.handle(Method::Get, path, None)
    }

    fn post(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        self.handle(Method::Post, path, Some(body))
    }

    fn patch(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        self.handle(Method::Patch, path, Some(body))
    }

    fn delete(&self, path: &str) -> Result<Response> {
        self.handle(Method::Delete, path, None)
    }
}

fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

fn error_body(detail: &str) -> Vec<u8> {
    encode(&ErrorDocument {
        errors: vec![ErrorObject {
            detail: detail.to_string(),
        }],
    })
}

fn not_found(id: &str) -> (u16, Vec<u8>) {
    (404, error_body(&format!("chain {} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serves_collection_with_pagination_links() {
        let backend = InMemoryBackend::default()
            .with_page_size(2)
            .with_chain("a", json!({}))
            .with_chain("b", json!({}))
            .with_chain("c", json!({}));

        let mut resp = backend.get("/v2/chains/solana?page=1").unwrap();
        let body: serde_json::Value = serde_json::from_slice(&resp.read_body().unwrap()).unwrap();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["count"], json!(3));
        assert!(body["links"]["next"].is_string());
        assert!(body["links"].get("prev").is_none());
    }

    #[test]
    fn records_requests_with_bodies() {
        let backend = InMemoryBackend::default();
        backend
            .post(
                "/v2/chains/solana",
                br#"{"chainID":"x","config":{}}"#.to_vec(),
            )
            .unwrap();
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].body.as_ref().unwrap()["chainID"], json!("x"));
    }

    #[test]
    fn unknown_chain_is_not_found() {
        let backend = InMemoryBackend::default();
        let resp = backend.get("/v2/chains/solana/missing").unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn other_namespaces_are_not_routed() {
        let backend = InMemoryBackend::default();
        let resp = backend.get("/v2/chains/evm").unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn injected_send_failure_is_transport_error() {
        let backend = InMemoryBackend::default();
        backend.fail_next_send("connection refused");
        assert!(matches!(
            backend.get("/v2/chains/solana"),
            Err(ChainError::Transport(_))
        ));
        assert_eq!(backend.request_count(), 0);
        assert!(backend.get("/v2/chains/solana").is_ok());
    }
}
