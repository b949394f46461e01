//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for chain operations, whatever the UI.
//!
//! It binds an [`HttpClient`] to a [`ChainType`] namespace and dispatches to the
//! matching command. It does no business logic (see `commands/*.rs`) and no
//! presentation (see [`crate::presenters`]).
//!
//! ## Generic Over HttpClient
//!
//! `ChainsApi<C: HttpClient>` is generic over the transport:
//! - Production: `ChainsApi<ReqwestClient>`
//! - Testing: `ChainsApi<InMemoryBackend>`

use crate::client::HttpClient;
use crate::commands;
use crate::error::Result;
use crate::model::ChainType;
use serde_json::Value;

pub struct ChainsApi<C: HttpClient> {
    client: C,
    chain_type: ChainType,
}

impl<C: HttpClient> ChainsApi<C> {
    pub fn new(client: C, chain_type: ChainType) -> Self {
        Self { client, chain_type }
    }

    pub fn list_chains(&self, page: u32) -> Result<commands::CmdResult> {
        commands::list::run(&self.client, &self.chain_type, page)
    }

    pub fn create_chain(&self, id: &str, config: Option<Value>) -> Result<commands::CmdResult> {
        commands::create::run(&self.client, &self.chain_type, id, config)
    }

    pub fn remove_chain(&self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&self.client, &self.chain_type, id)
    }

    pub fn configure_chain<T: AsRef<str>>(
        &self,
        id: &str,
        overrides: &[T],
    ) -> Result<commands::CmdResult> {
        commands::configure::run(&self.client, &self.chain_type, id, overrides)
    }

    pub fn chain_type(&self) -> &ChainType {
        &self.chain_type
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};
