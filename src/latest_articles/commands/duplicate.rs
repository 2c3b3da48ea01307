use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ArticlePluginParams;
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

/// Copy a block under a new id, into `placeholder` or the source's own placeholder.
pub fn run<S: DataStore>(store: &mut S, id: &Uuid, placeholder: Option<&str>) -> Result<CmdResult> {
    let source = store.get_block(id)?;

    let mut copy = ArticlePluginParams {
        id: Uuid::new_v4(),
        placeholder: placeholder.unwrap_or(&source.placeholder).to_string(),
        categories: Default::default(),
        tags: Default::default(),
        ..source.clone()
    };
    copy.copy_relations(&source);
    store.save_block(&copy)?;
    info!(source = %source.id, block = %copy.id, placeholder = %copy.placeholder, "block duplicated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Block {} duplicated as {}",
        source.id, copy.id
    )));
    Ok(result.with_affected_blocks(vec![copy]))
}
