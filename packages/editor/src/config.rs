//! Session configuration

use serde::{Deserialize, Serialize};

/// What `EditSession::apply` does with a document that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommitPolicy {
    /// Commit anyway; the report is returned to the caller
    #[default]
    Advisory,

    /// Refuse to commit while the report has errors
    RejectInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Author recorded on commits that do not name one
    pub author: String,

    pub commit_policy: CommitPolicy,

    /// Discard the whole batch when one patch fails
    pub atomic_batches: bool,

    pub warnings_as_errors: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            author: "anonymous".to_string(),
            commit_policy: CommitPolicy::Advisory,
            atomic_batches: true,
            warnings_as_errors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_value(json!({ "commitPolicy": "rejectInvalid" })).unwrap();
        assert_eq!(config.commit_policy, CommitPolicy::RejectInvalid);
        assert_eq!(config.author, "anonymous");
        assert!(config.atomic_batches);
    }
}
