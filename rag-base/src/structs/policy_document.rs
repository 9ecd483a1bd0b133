use serde::{Deserialize, Serialize};

/// One immutable entry of the policy corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub id: String,     // stable id, e.g. "policy_002"
    pub title: String,  // short human title
    pub content: String,

    /// Keywords matched as substrings of the query. Lowercased at corpus load.
    pub keywords: Vec<String>,
}
