//! # lexaid
//!
//! AI legal assistant for your terminal - analyze, draft, and negotiate
//! legal documents.
//!
//! lexaid runs typed flows against a hosted generative model: upload a
//! document and get a structured risk report, draft a contract from a
//! description, estimate case costs, research case law, and more. Each
//! flow validates its input, renders a fixed prompt template, makes one
//! model call, and parses the reply against a declared output shape.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install lexaid
//!
//! # Analyze a lease
//! export GEMINI_API_KEY=...
//! lex analyze lease.pdf --regulation GDPR
//!
//! # Draft an NDA
//! lex draft NDA --details "Acme Corp and Jane Doe, two year term"
//! ```

pub mod ai;
pub mod core;
pub mod flows;

pub use ai::{model_from_config, AiError, ClaudeModel, GeminiModel, GenerationRequest, GenerativeModel};
pub use core::{
    retry_transient, Config, ConfigError, DocumentPayload, MediaError, RetryPolicy, TransientError,
};
pub use flows::{FlowError, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "lexaid";

/// Short alias
pub const APP_ALIAS: &str = "lex";
