use super::{HttpClient, Response, ResponseBody};
use crate::config::ClientConfig;
use crate::error::{ChainError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::io::Read;
use std::time::Duration;

const USER_AGENT: &str = concat!("chainctl/", env!("CARGO_PKG_VERSION"));

/// Production [`HttpClient`] over `reqwest::blocking`.
///
/// No timeout is applied unless the configuration sets one.
pub struct ReqwestClient {
    base_url: String,
    client: Client,
}

impl ReqwestClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ChainError::validation(format!(
                "invalid backend URL: '{}' must start with http:// or https://",
                base_url
            )));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.url, config.timeout_secs.map(Duration::from_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<Response> {
        log::debug!("{} {}", method, self.url(path));
        let resp = request
            .header(ACCEPT, "application/vnd.api+json, application/json")
            .send()
            .map_err(|e| ChainError::Transport(format!("{} {}: {}", method, path, e)))?;
        let status = resp.status().as_u16();
        log::debug!("{} {} -> {}", method, path, status);
        Ok(Response::new(status, Box::new(ReqwestBody { inner: Some(resp) })))
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, path: &str) -> Result<Response> {
        self.send("GET", path, self.client.get(self.url(path)))
    }

    fn post(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        let request = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send("POST", path, request)
    }

    fn patch(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        let request = self
            .client
            .patch(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send("PATCH", path, request)
    }

    fn delete(&self, path: &str) -> Result<Response> {
        self.send("DELETE", path, self.client.delete(self.url(path)))
    }
}

/// Body of a reqwest response. Closing drops the connection's read half.
struct ReqwestBody {
    inner: Option<reqwest::blocking::Response>,
}

impl Read for ReqwestBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.inner.as_mut() {
            Some(resp) => resp.read(buf),
            None => Ok(0),
        }
    }
}

impl ResponseBody for ReqwestBody {
    fn close(&mut self) -> std::io::Result<()> {
        self.inner.take();
        Ok(())
    }
}
