use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let block = store.get_block(id)?;
    store.delete_block(id)?;
    info!(block = %id, placeholder = %block.placeholder, "block removed");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Block removed from {}: {}",
        block.placeholder, block.id
    )));
    Ok(result.with_affected_blocks(vec![block]))
}
