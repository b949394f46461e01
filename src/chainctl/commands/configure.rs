use crate::client::HttpClient;
use crate::commands::helpers::{decode_resource, encode_body, require_id, with_response};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ChainError, Result};
use crate::model::{ChainType, UpdateChainRequest};
use crate::patch::{merge, overrides_to_map, parse_overrides};

const USAGE: &str = "usage: chainctl configure --id <chain ID> key1=value1 key2=value2 ...";

/// Read-modify-write update of a chain's config.
///
/// All input is validated before the first request. The current chain is then
/// fetched, the overrides are merged into its config, and the whole config is
/// sent back together with the chain's current `enabled` flag.
pub fn run<C: HttpClient, T: AsRef<str>>(
    client: &C,
    chain_type: &ChainType,
    id: &str,
    tokens: &[T],
) -> Result<CmdResult> {
    require_id(id, &format!("missing chain ID ({})", USAGE))?;
    if tokens.is_empty() {
        return Err(ChainError::validation(format!(
            "must pass in at least one chain configuration parameter ({})",
            USAGE
        )));
    }
    let overrides = parse_overrides(tokens)?;

    let path = chain_type.resource_path(id);
    let response = client.get(&path)?;
    let current = with_response(response, decode_resource)?;

    let body = encode_body(&UpdateChainRequest {
        enabled: current.enabled,
        config: merge(&current.config, &overrides),
    })?;
    let response = client.patch(&path, body)?;
    let updated = with_response(response, decode_resource)?;

    let changed = overrides_to_map(&overrides).len();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Chain {} updated ({} {})",
        updated.id,
        changed,
        if changed == 1 { "parameter" } else { "parameters" }
    )));
    Ok(result.with_affected_chain(updated))
}
