use crate::client::HttpClient;
use crate::commands::helpers::{decode_page, with_response};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ChainType;

/// Path for a page of the listing. Page 0 leaves the choice to the backend.
pub fn page_path(chain_type: &ChainType, page: u32) -> String {
    let base = chain_type.collection_path();
    if page > 0 {
        format!("{}?page={}", base, page)
    } else {
        base
    }
}

pub fn run<C: HttpClient>(client: &C, chain_type: &ChainType, page: u32) -> Result<CmdResult> {
    let response = client.get(&page_path(chain_type, page))?;
    let page = with_response(response, |resp| decode_page(resp, page))?;
    log::debug!("fetched {} {} chains", page.len(), chain_type);
    Ok(CmdResult::default().with_page(page))
}
