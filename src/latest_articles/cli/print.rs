use colored::Colorize;
use latest_articles::api::{CmdMessage, MessageLevel};
use latest_articles::config::TemplateChoice;
use latest_articles::model::ArticlePluginParams;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_blocks(blocks: &[ArticlePluginParams]) {
    for block in blocks {
        println!(
            "{} {} {}",
            block.id.to_string().yellow(),
            format!("[{}]", block.placeholder).cyan(),
            block.title.bold()
        );
        println!("    {}", describe(block).dimmed());
    }
}

pub(super) fn print_templates(templates: &[TemplateChoice]) {
    for (i, template) in templates.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        println!("{} {}  {}", marker, template.path.yellow(), template.label);
    }
}

fn describe(block: &ArticlePluginParams) -> String {
    let mut parts = vec![
        format!("{} articles", block.cards_quantity),
        block.privacy_criterion.label().to_string(),
    ];
    if let Some(status) = block.status {
        parts.push(status.to_string());
    }
    match block.featured {
        Some(true) => parts.push("featured only".to_string()),
        Some(false) => parts.push("not featured".to_string()),
        None => {}
    }
    if !block.categories.is_empty() {
        parts.push(format!("categories {}", join_ids(block.categories.iter())));
    }
    if !block.tags.is_empty() {
        parts.push(format!("tags {}", join_ids(block.tags.iter())));
    }
    parts.push(block.template.clone());
    parts.join(", ")
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a u64>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use latest_articles::model::PrivacyCriterion;

    #[test]
    fn describe_default_block() {
        let block = ArticlePluginParams::default();
        assert_eq!(
            describe(&block),
            "5 articles, Public only, published, not featured, latest_articles/default.html"
        );
    }

    #[test]
    fn describe_lists_relations() {
        let mut block = ArticlePluginParams::default();
        block.status = None;
        block.featured = None;
        block.privacy_criterion = PrivacyCriterion::PrivateOnly;
        block.categories.extend([2, 1]);
        block.tags.insert(9);
        assert_eq!(
            describe(&block),
            "5 articles, Private only if accessible, categories 1,2, tags 9, latest_articles/default.html"
        );
    }
}
