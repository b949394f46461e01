//! # Chainctl Architecture
//!
//! Chainctl lists, creates, removes and reconfigures the chains a node exposes on
//! its HTTP API (`/v2/chains/{type}`). It is a library with a CLI client: the
//! binary only parses arguments and prints, everything else lives here.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, resolves config sources, prints        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade binding a client to a chain namespace        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, patch.rs)                    │
//! │  - Validation, request building, merge-patch, decoding      │
//! │  - Returns typed results, never prints                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transport Layer (client/)                                  │
//! │  - Abstract HttpClient trait and owned Response handles     │
//! │  - ReqwestClient (production), InMemoryBackend (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Presentation of results goes through [`presenters`], which the CLI calls with
//! whatever sink it writes to.
//!
//! ## Partial Updates
//!
//! `configure` is a read-modify-write: the chain is fetched, `key=value` overrides
//! replace top-level fields of its config, and the complete config is sent back.
//! See [`patch`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`patch`]: Override parsing and merging
//! - [`presenters`]: Table and JSON rendering
//! - [`client`]: Transport trait and implementations
//! - [`model`]: Chain resources, pages and JSON:API wire types
//! - [`config`]: Client configuration
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod patch;
pub mod presenters;
