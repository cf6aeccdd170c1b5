use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the postboard binary.
#[derive(Debug, Parser)]
#[command(name = "postboard", version, about = "Postboard blog post admin client")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "POSTBOARD_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the post API base URL.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print one page of posts.
    List(ListArgs),
    /// Page, search and delete posts interactively.
    Browse(ListArgs),
    /// Print a single post.
    Show(ShowArgs),
    /// Remove a post.
    Delete(DeleteArgs),
    /// Create a post.
    Create(PostFieldArgs),
    /// Edit an existing post.
    Edit(EditArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    /// Page to show.
    #[arg(long, value_name = "PAGE")]
    pub page: Option<u32>,

    /// Page size.
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<u32>,

    /// Filter by title.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Extra query parameter passed through to the API.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    #[command(flatten)]
    pub overrides: ListOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListOverrides {
    /// Clear the list when a page comes back empty.
    #[arg(
        long = "clear-on-empty",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub clear_on_empty: Option<bool>,

    /// Override the search debounce window.
    #[arg(long = "search-debounce-ms", value_name = "MILLIS")]
    pub search_debounce_ms: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Post id.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    /// Post id.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y', action = clap::ArgAction::SetTrue)]
    pub yes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EditArgs {
    /// Post id.
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: PostFieldArgs,
}

/// Post form fields. Omitted fields keep their current value.
#[derive(Debug, Args, Default, Clone)]
pub struct PostFieldArgs {
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub author: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Background image URL.
    #[arg(long = "image-url", value_name = "URL", conflicts_with_all = ["image", "random_image"])]
    pub image_url: Option<String>,

    /// Pick a random picsum.photos background.
    #[arg(long = "random-image", action = clap::ArgAction::SetTrue, conflicts_with = "image")]
    pub random_image: bool,

    /// Upload a local image instead of using a URL.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub image: Option<PathBuf>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}
