use crate::client::Response;
use crate::error::{combine, ChainError, Result};
use crate::model::{ChainResource, Document, ErrorDocument, ResourceObject, ResourcePage};
use serde::Serialize;

/// Runs `f` against a response and always releases the response afterwards.
///
/// A failed release is reported: on its own if `f` succeeded, aggregated with
/// `f`'s error otherwise.
pub fn with_response<T, F>(mut response: Response, f: F) -> Result<T>
where
    F: FnOnce(&mut Response) -> Result<T>,
{
    let outcome = f(&mut response);
    let released = response.close();
    combine(outcome, released)
}

/// Reads the body, turning a non-2xx status into `ChainError::Backend`.
pub fn parse_response(response: &mut Response) -> Result<Vec<u8>> {
    let body = response.read_body()?;
    if response.is_success() {
        return Ok(body);
    }
    Err(backend_error(response.status(), &body))
}

fn backend_error(status: u16, body: &[u8]) -> ChainError {
    let detail = match serde_json::from_slice::<ErrorDocument>(body) {
        Ok(doc) if !doc.errors.is_empty() => doc
            .errors
            .iter()
            .map(|e| e.detail.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                default_detail(status).to_string()
            } else {
                text
            }
        }
    };
    ChainError::Backend { status, detail }
}

fn default_detail(status: u16) -> &'static str {
    match status {
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        409 => "conflict",
        422 => "unprocessable entity",
        500..=599 => "server error",
        _ => "request failed",
    }
}

/// Decodes a single-resource document.
pub fn decode_resource(response: &mut Response) -> Result<ChainResource> {
    let body = parse_response(response)?;
    let doc: Document<ResourceObject> =
        serde_json::from_slice(&body).map_err(|e| ChainError::Decode(e.to_string()))?;
    Ok(doc.data.into())
}

/// Decodes a collection document into the page that was requested.
pub fn decode_page(response: &mut Response, page: u32) -> Result<ResourcePage> {
    let body = parse_response(response)?;
    let doc: Document<Vec<ResourceObject>> =
        serde_json::from_slice(&body).map_err(|e| ChainError::Decode(e.to_string()))?;
    Ok(ResourcePage {
        resources: doc.data.into_iter().map(ChainResource::from).collect(),
        page,
        links: doc.links.unwrap_or_default(),
        count: doc.meta.and_then(|m| m.count),
    })
}

/// Discards the body, only checking the status.
pub fn expect_success(response: &mut Response) -> Result<()> {
    parse_response(response).map(|_| ())
}

pub fn encode_body<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn require_id(id: &str, message: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ChainError::validation(message));
    }
    // Dot segments survive encoding and are collapsed by URL normalisation.
    if id == "." || id == ".." {
        return Err(ChainError::validation(format!("invalid chain ID: {}", id)));
    }
    Ok(())
}
