use crate::client::HttpClient;
use crate::commands::helpers::{expect_success, require_id, with_response};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ChainType;

pub fn run<C: HttpClient>(client: &C, chain_type: &ChainType, id: &str) -> Result<CmdResult> {
    require_id(id, "must pass the id of the chain to be removed")?;

    let response = client.delete(&chain_type.resource_path(id))?;
    with_response(response, expect_success)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Chain {} deleted", id)));
    Ok(result)
}
