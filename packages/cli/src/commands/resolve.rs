use super::{read_document, write_json};
use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use uidsl_editor::{locate, resolve_parent, NodeRef};

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("reference").required(true))]
pub struct ResolveArgs {
    /// Document to search
    pub document: PathBuf,

    /// Node id
    #[arg(long, group = "reference")]
    pub id: Option<String>,

    /// Structural path, e.g. sections[0].content[2]
    #[arg(long, group = "reference")]
    pub path: Option<String>,

    /// External test tag
    #[arg(long, group = "reference")]
    pub tag: Option<String>,

    /// Report the node's structural parent instead
    #[arg(long)]
    pub parent: bool,
}

impl ResolveArgs {
    fn node_ref(&self) -> Option<NodeRef> {
        self.id
            .clone()
            .map(NodeRef::id)
            .or_else(|| self.path.clone().map(NodeRef::path))
            .or_else(|| self.tag.clone().map(NodeRef::tag))
    }
}

pub fn resolve(args: ResolveArgs, _cwd: &str) -> Result<()> {
    let document = read_document(&args.document)?;
    let node_ref = args
        .node_ref()
        .ok_or_else(|| anyhow::anyhow!("One of --id, --path or --tag is required"))?;

    let found = if args.parent {
        resolve_parent(&document, &node_ref).map(|parent| {
            json!({
                "owner": parent.owner.id(),
                "category": parent.owner.category(),
                "container": parent.container,
                "index": parent.index,
            })
        })
    } else {
        match locate(&document, &node_ref) {
            Some(resolved) => Some(json!({
                "location": resolved.location.to_string(),
                "category": resolved.node.category(),
                "node": resolved.node.to_value()?,
            })),
            None => None,
        }
    };

    match found {
        Some(value) => write_json(&value, None),
        None => Err(anyhow::anyhow!("Nothing matches {}", node_ref)),
    }
}
