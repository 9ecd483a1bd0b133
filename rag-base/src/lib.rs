//! Public API:
//! - [`PolicyCorpus`]: the fixed, validated policy corpus (built once, shared read-only).
//! - [`KeywordRetriever::retrieve`]: deterministic keyword-overlap ranking with citations.

pub mod corpus;
pub mod errors;
pub mod search;
pub mod structs;

pub use corpus::PolicyCorpus;
pub use errors::rag_base_error::RagBaseError;
pub use search::{DEFAULT_TOP_K, KeywordRetriever};
pub use structs::{
    citation::{Citation, RetrievedPolicy},
    policy_document::PolicyDocument,
};
