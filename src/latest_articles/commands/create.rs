use crate::commands::{unknown_relation_warnings, validate_and_save, BlockChanges, CmdMessage, CmdResult};
use crate::config::BlocksConfig;
use crate::error::Result;
use crate::model::ArticlePluginParams;
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(
    store: &mut S,
    config: &BlocksConfig,
    placeholder: &str,
    changes: BlockChanges,
) -> Result<CmdResult> {
    let mut block = ArticlePluginParams::new(placeholder);
    block.template = config.default_template();
    changes.apply_to(&mut block);

    validate_and_save(store, &config.templates(), &block)?;
    info!(block = %block.id, placeholder, "block created");

    let mut result = CmdResult::default();
    for warning in unknown_relation_warnings(store, &block)? {
        result.add_message(warning);
    }
    result.add_message(CmdMessage::success(format!(
        "Block created in {}: {}",
        block.placeholder, block.id
    )));
    Ok(result.with_affected_blocks(vec![block]))
}
