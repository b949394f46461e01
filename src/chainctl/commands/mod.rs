use crate::model::{ChainResource, ResourcePage};

pub mod configure;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Chains created or changed by the command
    pub affected_chains: Vec<ChainResource>,
    /// The page fetched by a listing
    pub page: Option<ResourcePage>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_chain(mut self, chain: ChainResource) -> Self {
        self.affected_chains.push(chain);
        self
    }

    pub fn with_page(mut self, page: ResourcePage) -> Self {
        self.page = Some(page);
        self
    }
}
