use crate::commands::{unknown_relation_warnings, validate_and_save, BlockChanges, CmdMessage, CmdResult};
use crate::config::BlocksConfig;
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

pub fn run<S: DataStore>(
    store: &mut S,
    config: &BlocksConfig,
    id: &Uuid,
    changes: BlockChanges,
) -> Result<CmdResult> {
    let mut block = store.get_block(id)?;
    let mut result = CmdResult::default();

    if changes.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change"));
        return Ok(result.with_affected_blocks(vec![block]));
    }

    changes.apply_to(&mut block);
    validate_and_save(store, &config.templates(), &block)?;
    info!(block = %block.id, "block reconfigured");

    for warning in unknown_relation_warnings(store, &block)? {
        result.add_message(warning);
    }
    result.add_message(CmdMessage::success(format!("Block updated: {}", block.id)));
    Ok(result.with_affected_blocks(vec![block]))
}
