use clap::{Args, Parser, Subcommand, ValueEnum};
use latest_articles::model::{CategoryId, PrivacyCriterion, Status, TagId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "latest-articles")]
#[command(about = "Place, configure and render \"latest articles\" blocks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding articles.json, blocks.json and latest-articles.toml
    #[arg(long, global = true, env = "LATEST_ARTICLES_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place a new block in a placeholder
    Add {
        /// Placeholder (page region) the block belongs to
        #[arg(short, long, default_value = "content")]
        placeholder: String,

        #[command(flatten)]
        settings: BlockArgs,
    },

    /// Change the settings of a block
    Configure {
        /// Block id (or a unique prefix of it)
        id: String,

        #[command(flatten)]
        settings: BlockArgs,
    },

    /// Remove a block
    #[command(alias = "rm")]
    Remove {
        /// Block id (or a unique prefix of it)
        id: String,
    },

    /// List blocks
    #[command(alias = "ls")]
    List {
        /// Only blocks in this placeholder
        #[arg(short, long)]
        placeholder: Option<String>,
    },

    /// Copy a block, with its categories and tags
    Duplicate {
        /// Block id (or a unique prefix of it)
        id: String,

        /// Placeholder for the copy (defaults to the source's)
        #[arg(short, long)]
        placeholder: Option<String>,
    },

    /// Render a block as a reader would see it
    Render {
        /// Block id (or a unique prefix of it)
        id: String,

        /// Render for this logged-in user (anonymous if omitted)
        #[arg(short, long)]
        user: Option<String>,

        /// Print the template context as JSON instead of markup
        #[arg(long)]
        json: bool,
    },

    /// List the presentation templates editors can choose from
    Templates,
}

/// Block settings shared by `add` and `configure`. Omitted options are left unchanged.
#[derive(Args, Debug, Default)]
pub struct BlockArgs {
    /// Title shown above the list
    #[arg(short, long)]
    pub title: Option<String>,

    /// Number of articles to show (at least 3)
    #[arg(short, long)]
    pub quantity: Option<u32>,

    /// Category ids, comma separated; pass with no value to clear
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub categories: Option<Vec<CategoryId>>,

    /// Tag ids, comma separated; pass with no value to clear
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub tags: Option<Vec<TagId>>,

    /// Article status to show: draft, published or any
    #[arg(long, value_parser = parse_status_filter)]
    pub status: Option<StatusFilter>,

    /// Featured filter
    #[arg(long, value_enum)]
    pub featured: Option<FeaturedFilter>,

    /// Which articles to show by privacy (private-only, public-and-private, public-only)
    #[arg(long)]
    pub privacy: Option<PrivacyCriterion>,

    /// Presentation template key
    #[arg(long)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Any,
    Only(Status),
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    if s.eq_ignore_ascii_case("any") {
        return Ok(StatusFilter::Any);
    }
    s.parse().map(StatusFilter::Only)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeaturedFilter {
    /// Only featured articles
    Yes,
    /// Only articles that are not featured
    No,
    /// Featured or not
    Any,
}
