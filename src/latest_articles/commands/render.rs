use crate::commands::{CmdResult, RenderedBlock};
use crate::error::Result;
use crate::model::Viewer;
use crate::plugin::LatestArticlesPlugin;
use crate::store::DataStore;
use uuid::Uuid;

pub fn run<S: DataStore>(
    store: &S,
    plugin: &LatestArticlesPlugin,
    id: &Uuid,
    viewer: &Viewer,
) -> Result<CmdResult> {
    let block = store.get_block(id)?;
    let context = plugin.render(store, &block, viewer)?;
    let html = plugin.render_html(&context)?;
    Ok(CmdResult::default().with_rendered(RenderedBlock { context, html }))
}
