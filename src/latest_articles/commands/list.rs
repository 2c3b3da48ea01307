use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, placeholder: Option<&str>) -> Result<CmdResult> {
    let blocks: Vec<_> = store
        .list_blocks()?
        .into_iter()
        .filter(|b| placeholder.map_or(true, |p| b.placeholder == p))
        .collect();

    let mut result = CmdResult::default();
    if blocks.is_empty() {
        result.add_message(CmdMessage::info("No blocks found."));
    }
    Ok(result.with_listed_blocks(blocks))
}
