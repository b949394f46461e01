//! # Transport Layer
//!
//! The [`HttpClient`] trait is the only way the command layer talks to the
//! backend. It deals in API paths (`/v2/chains/solana`) and raw JSON bodies, and
//! hands back a [`Response`] handle that the caller owns and must release.
//!
//! ## Implementations
//!
//! - [`http::ReqwestClient`]: production client over `reqwest::blocking`
//! - [`memory::InMemoryBackend`]: serves the chain routes from memory for tests,
//!   with request recording and fault injection
//!
//! ## Response Handles
//!
//! A [`Response`] wraps a [`ResponseBody`], which must be closed exactly once.
//! Commands release handles with [`crate::commands::helpers::with_response`],
//! which reports a failed close. A handle that is dropped without being closed
//! closes itself and logs any failure.

use crate::error::{ChainError, Result};
use std::io::Read;

pub mod http;
pub mod memory;

/// The readable body of a response that must be released when done.
pub trait ResponseBody: Read {
    fn close(&mut self) -> std::io::Result<()>;
}

/// A response handle exclusively owned by the operation that received it.
pub struct Response {
    status: u16,
    body: Option<Box<dyn ResponseBody>>,
}

impl Response {
    pub fn new(status: u16, body: Box<dyn ResponseBody>) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads the remainder of the body. Fails if the handle was already closed.
    pub fn read_body(&mut self) -> Result<Vec<u8>> {
        let body = self
            .body
            .as_mut()
            .ok_or_else(|| ChainError::Transport("response body already closed".into()))?;
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)
            .map_err(|e| ChainError::Transport(format!("failed to read response body: {}", e)))?;
        Ok(buf)
    }

    /// Releases the body. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        match self.body.take() {
            Some(mut body) => body.close().map_err(ChainError::Close),
            None => Ok(()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.body.is_none()
    }
}

impl Drop for Response {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("{}", e);
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Abstract interface to the backend's HTTP API.
///
/// Paths are relative to the backend root. Failing to send a request at all is a
/// `ChainError::Transport`; any status the backend returns is a `Response`.
pub trait HttpClient {
    fn get(&self, path: &str) -> Result<Response>;

    fn post(&self, path: &str, body: Vec<u8>) -> Result<Response>;

    fn patch(&self, path: &str, body: Vec<u8>) -> Result<Response>;

    fn delete(&self, path: &str) -> Result<Response>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, path: &str) -> Result<Response> {
        (**self).get(path)
    }

    fn post(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        (**self).post(path, body)
    }

    fn patch(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        (**self).patch(path, body)
    }

    fn delete(&self, path: &str) -> Result<Response> {
        (**self).delete(path)
    }
}

/// An in-memory body, optionally failing when closed.
pub struct BufferedBody {
    reader: std::io::Cursor<Vec<u8>>,
    close_error: Option<String>,
}

impl BufferedBody {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            reader: std::io::Cursor::new(bytes),
            close_error: None,
        }
    }

    pub fn failing_close(mut self, message: impl Into<String>) -> Self {
        self.close_error = Some(message.into());
        self
    }
}

impl Read for BufferedBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl ResponseBody for BufferedBody {
    fn close(&mut self) -> std::io::Result<()> {
        match self.close_error.take() {
            Some(message) => Err(std::io::Error::other(message)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_then_closes_body() {
        let mut resp = Response::new(200, Box::new(BufferedBody::new(b"{}".to_vec())));
        assert!(resp.is_success());
        assert_eq!(resp.read_body().unwrap(), b"{}");
        resp.close().unwrap();
        assert!(resp.is_closed());
        resp.close().unwrap();
    }

    #[test]
    fn reading_a_closed_body_fails() {
        let mut resp = Response::new(200, Box::new(BufferedBody::new(vec![])));
        resp.close().unwrap();
        assert!(matches!(resp.read_body(), Err(ChainError::Transport(_))));
    }

    #[test]
    fn close_failure_is_reported() {
        let body = BufferedBody::new(vec![]).failing_close("socket gone");
        let mut resp = Response::new(500, Box::new(body));
        assert!(!resp.is_success());
        let err = resp.close().unwrap_err();
        assert!(matches!(err, ChainError::Close(_)));
        assert!(err.to_string().contains("socket gone"));
    }
}
