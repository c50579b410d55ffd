use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data binding attachable to sections, modules, widgets and content nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataSource {
    /// Bound later by the application
    Placeholder,

    Static {
        #[serde(default)]
        payload: Value,
    },

    Http {
        url: String,
        #[serde(default)]
        method: HttpMethod,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        params: IndexMap<String, Value>,
    },

    /// Generated rows following `schema`
    Mock {
        #[serde(default)]
        schema: Value,
        #[serde(default = "default_mock_count")]
        count: u32,
    },
}

fn default_mock_count() -> u32 {
    10
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}
