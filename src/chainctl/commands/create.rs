use crate::client::HttpClient;
use crate::commands::helpers::{decode_resource, encode_body, require_id, with_response};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ChainError, Result};
use crate::model::{ChainType, CreateChainRequest};
use serde_json::Value;

const MISSING_CONFIG: &str =
    "must pass in the chain's parameters [--id string] [JSON blob | JSON filepath]";
const MISSING_ID: &str = "missing chain ID [--id string]";

/// Checks the arguments of a create: a config source must be given, then an id.
///
/// Callers that resolve the config from a file run this first, so a missing id
/// is reported before the file is read.
pub fn validate(id: &str, has_config: bool) -> Result<()> {
    if !has_config {
        return Err(ChainError::validation(MISSING_CONFIG));
    }
    require_id(id, MISSING_ID)
}

pub fn run<C: HttpClient>(
    client: &C,
    chain_type: &ChainType,
    id: &str,
    config: Option<Value>,
) -> Result<CmdResult> {
    validate(id, config.is_some())?;
    let config = config.ok_or_else(|| ChainError::validation(MISSING_CONFIG))?;

    let body = encode_body(&CreateChainRequest {
        chain_id: id.to_string(),
        config,
    })?;
    let response = client.post(&chain_type.collection_path(), body)?;
    let chain = with_response(response, decode_resource)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Chain {} created", chain.id)));
    Ok(result.with_affected_chain(chain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{InMemoryBackend, Method};
    use serde_json::json;

    #[test]
    fn validate_checks_config_before_id() {
        let err = validate("", false).unwrap_err();
        assert!(err.to_string().contains("chain's parameters"));
        let err = validate("", true).unwrap_err();
        assert!(err.to_string().contains("missing chain ID"));
        assert!(validate("devnet", true).is_ok());
    }

    #[test]
    fn creates_chain_with_config() {
        let backend = InMemoryBackend::default();
        let config = json!({"url": "http://a", "timeout": 5});
        let result = run(&backend, &ChainType::default(), "devnet", Some(config.clone())).unwrap();

        let chain = &result.affected_chains[0];
        assert_eq!(chain.id, "devnet");
        assert!(chain.enabled);
        assert_eq!(Value::Object(chain.config.clone()), config);

        let req = &backend.requests()[0];
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/v2/chains/solana");
        assert_eq!(
            req.body.as_ref().unwrap(),
            &json!({"chainID": "devnet", "config": config})
        );
    }

    #[test]
    fn missing_config_fails_before_request() {
        let backend = InMemoryBackend::default();
        let err = run(&backend, &ChainType::default(), "devnet", None).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("chain's parameters"));
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn missing_id_fails_before_request() {
        let backend = InMemoryBackend::default();
        let err = run(&backend, &ChainType::default(), "", Some(json!({}))).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("missing chain ID"));
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn duplicate_chain_is_backend_error() {
        let backend = InMemoryBackend::default().with_chain("devnet", json!({}));
        let err = run(&backend, &ChainType::default(), "devnet", Some(json!({}))).unwrap_err();
        assert!(matches!(err, ChainError::Backend { status: 409, .. }));
    }

    #[test]
    fn uses_chain_type_namespace() {
        let evm: ChainType = "evm".parse().unwrap();
        let backend = InMemoryBackend::new(evm.clone());
        run(&backend, &evm, "1", Some(json!({}))).unwrap();
        assert_eq!(backend.requests()[0].path, "/v2/chains/evm");
    }
}
