//! Subcommand implementations of the postboard binary.

use std::{path::Path, sync::Arc};

use postboard::{
    application::{
        api::PostApi,
        detail::PostDetail,
        error::AppError,
        form::{
            AUTHOR, DESCRIPTION, FormDefaults, FormView, IMAGE_URL, PostForm, SavePost,
            SubmitOutcome, TITLE, post_rules,
        },
        list::{Debouncer, ListController, ListEvent, Removal, remove_post, removed_toast},
        location::MemoryLocation,
        notify::{Confirm, Notifier},
    },
    config::{ListArgs, PostFieldArgs, Settings},
    domain::{
        filter::{FilterState, LIMIT_KEY, PAGE_KEY, SEARCH_KEY},
        posts::{ImageSource, Post, UploadFile},
    },
    infra::{
        error::InfraError,
        terminal::{
            AutoConfirm, PromptConfirm, SharedInput, TerminalDetailRenderer, TerminalForm,
            TerminalListRenderer, TerminalNotifier,
        },
    },
};
use tokio::sync::mpsc;
use tracing::debug;
use url::Url;

const LIST_LOCATION: &str = "postboard://localhost/posts";
const DETAIL_LOCATION: &str = "postboard://localhost/post";
const BROWSE_HELP: &str =
    "commands: n(ext) | p(rev) | /<title search> | d <n> | f <key>=<value> | r(eload) | q(uit)";

pub struct Context {
    pub settings: Settings,
    pub api: Arc<dyn PostApi>,
}

/// Print one page of posts.
pub async fn run_list(ctx: &Context, args: ListArgs) -> Result<(), AppError> {
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let confirm: Arc<dyn Confirm> = Arc::new(AutoConfirm(false));
    let mut controller = ListController::new(
        ctx.api.clone(),
        MemoryLocation::new(list_location(&args)?),
        TerminalListRenderer::stdout(),
        notifier,
        confirm,
        ctx.settings.list_options(),
    );

    controller.initialize().await?;
    Ok(())
}

/// Interactive paging over stdin until `q` or end of input.
pub async fn run_browse(ctx: &Context, args: ListArgs) -> Result<(), AppError> {
    let input = SharedInput::stdin();
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let confirm: Arc<dyn Confirm> = Arc::new(PromptConfirm::new(input.clone()));
    let mut controller = ListController::new(
        ctx.api.clone(),
        MemoryLocation::new(list_location(&args)?),
        TerminalListRenderer::stdout(),
        notifier,
        confirm,
        ctx.settings.list_options(),
    );

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let search = Debouncer::new(ctx.settings.list.search_debounce, move |text: String| {
        let _ = events_tx.send(ListEvent::Search(text));
    });

    // A failed first load is already logged; the user can still reload.
    let _ = controller.initialize().await;
    println!("{BROWSE_HELP}");

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line.map_err(InfraError::from)? else {
                    debug!("input closed");
                    break;
                };
                let Some(command) = parse_browse_command(&line) else {
                    continue;
                };
                match command {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Help => println!("{BROWSE_HELP}"),
                    BrowseCommand::Next => controller.handle(ListEvent::Next).await,
                    BrowseCommand::Prev => controller.handle(ListEvent::Prev).await,
                    BrowseCommand::Reload => {
                        let _ = controller.fetch_and_render().await;
                    }
                    BrowseCommand::Search(text) => search.call(text),
                    BrowseCommand::Filter { key, value } => {
                        controller.handle(ListEvent::Filter { key, value }).await;
                    }
                    BrowseCommand::Delete(position) => {
                        let post = position
                            .checked_sub(1)
                            .and_then(|index| controller.posts().get(index))
                            .cloned();
                        match post {
                            Some(post) => controller.handle(ListEvent::Delete(post)).await,
                            None => eprintln!("no post #{position} on this page"),
                        }
                    }
                    BrowseCommand::Unknown(raw) => {
                        eprintln!("unknown command `{raw}`");
                        println!("{BROWSE_HELP}");
                    }
                }
            }
            Some(event) = events.recv() => controller.handle(event).await,
        }
    }

    Ok(())
}

/// Print a single post.
pub async fn run_show(ctx: &Context, id: &str) -> Result<(), AppError> {
    let mut detail = PostDetail::new(
        ctx.api.clone(),
        TerminalDetailRenderer::stdout(),
        ctx.settings.display.placeholder_image.clone(),
    );
    detail.load(&detail_location(id)?).await?;
    Ok(())
}

/// Confirm, then remove one post.
pub async fn run_delete(ctx: &Context, id: &str, yes: bool) -> Result<(), AppError> {
    let post = ctx.api.get_by_id(id).await?;
    let confirm: Arc<dyn Confirm> = if yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(PromptConfirm::new(SharedInput::stdin()))
    };
    let notifier = TerminalNotifier;
    match remove_post(ctx.api.as_ref(), confirm.as_ref(), &notifier, &post).await? {
        Removal::Removed => notifier.notify(removed_toast()),
        Removal::Cancelled => eprintln!("cancelled"),
    }
    Ok(())
}

pub async fn run_create(ctx: &Context, fields: PostFieldArgs) -> Result<(), AppError> {
    save_post(ctx, FormDefaults::default(), &fields).await
}

pub async fn run_edit(ctx: &Context, id: &str, fields: PostFieldArgs) -> Result<(), AppError> {
    let post = ctx.api.get_by_id(id).await?;
    save_post(ctx, FormDefaults::from(&post), &fields).await
}

async fn save_post(
    ctx: &Context,
    defaults: FormDefaults,
    fields: &PostFieldArgs,
) -> Result<(), AppError> {
    let save = Arc::new(SavePost::new(ctx.api.clone(), Arc::new(TerminalNotifier)));
    let form = PostForm::with_rules(
        TerminalForm::new(),
        post_rules(ctx.settings.form.max_upload_bytes),
        defaults,
        save.clone(),
    );
    apply_fields(&form, fields).await?;

    match form.submit().await? {
        SubmitOutcome::Submitted => {
            if let Some(post) = save.saved() {
                print_post(&post)?;
            }
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            Err(AppError::Invalid(errors))
        }
        SubmitOutcome::Busy => Err(AppError::unexpected("form is already submitting")),
    }
}

/// Copy command-line values into the form the way a user would fill it in.
async fn apply_fields(
    form: &PostForm<TerminalForm>,
    fields: &PostFieldArgs,
) -> Result<(), AppError> {
    let view = form.view();
    for (field, value) in [
        (TITLE, &fields.title),
        (AUTHOR, &fields.author),
        (DESCRIPTION, &fields.description),
    ] {
        if let Some(value) = value {
            view.set_field_value(field, value);
            form.on_field_input(field, value);
        }
    }

    if let Some(path) = fields.image.as_deref() {
        form.on_image_source_change(ImageSource::Upload);
        let file = upload_file(path).await?;
        view.set_file(file.clone());
        form.on_upload_change(Some(file));
    } else if let Some(url) = fields.image_url.as_deref() {
        form.on_image_source_change(ImageSource::Picsum);
        view.set_field_value(IMAGE_URL, url);
        view.set_hero_image(url);
    } else if fields.random_image {
        form.on_image_source_change(ImageSource::Picsum);
        let url = form.randomize_image();
        debug!(%url, "picked random background");
    }

    Ok(())
}

async fn upload_file(path: &Path) -> Result<UploadFile, AppError> {
    let metadata = tokio::fs::metadata(path).await.map_err(InfraError::from)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadFile::new(name, metadata.len()).with_path(path))
}

fn print_post(post: &Post) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(post)
        .map_err(|err| AppError::unexpected(format!("failed to encode post: {err}")))?;
    println!("{text}");
    Ok(())
}

fn list_location(args: &ListArgs) -> Result<Url, AppError> {
    let base = Url::parse(LIST_LOCATION)
        .map_err(|err| AppError::unexpected(format!("invalid list location: {err}")))?;

    let mut filter = FilterState::from_url(&base);
    if let Some(page) = args.page {
        filter.set(PAGE_KEY, page.to_string());
    }
    if let Some(limit) = args.limit {
        filter.set(LIMIT_KEY, limit.to_string());
    }
    if let Some(search) = args.search.as_ref() {
        filter.set(SEARCH_KEY, search.clone());
    }
    for (key, value) in &args.filters {
        filter.set(key, value.clone());
    }
    Ok(filter.apply_to(&base))
}

fn detail_location(id: &str) -> Result<Url, AppError> {
    let mut url = Url::parse(DETAIL_LOCATION)
        .map_err(|err| AppError::unexpected(format!("invalid detail location: {err}")))?;
    url.query_pairs_mut().append_pair("id", id);
    Ok(url)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Prev,
    Search(String),
    /// 1-based position on the current page.
    Delete(usize),
    Filter { key: String, value: String },
    Reload,
    Help,
    Quit,
    Unknown(String),
}

fn parse_browse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(text) = line.strip_prefix('/') {
        return Some(BrowseCommand::Search(text.to_string()));
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));
    let command = match (verb, rest) {
        ("n" | "next", "") => BrowseCommand::Next,
        ("p" | "prev", "") => BrowseCommand::Prev,
        ("r" | "reload", "") => BrowseCommand::Reload,
        ("h" | "help" | "?", "") => BrowseCommand::Help,
        ("q" | "quit" | "exit", "") => BrowseCommand::Quit,
        ("d" | "delete", position) => match position.parse() {
            Ok(position) => BrowseCommand::Delete(position),
            Err(_) => BrowseCommand::Unknown(line.to_string()),
        },
        ("f" | "filter", pair) => match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => BrowseCommand::Filter {
                key: key.to_string(),
                value: value.to_string(),
            },
            _ => BrowseCommand::Unknown(line.to_string()),
        },
        _ => BrowseCommand::Unknown(line.to_string()),
    };
    Some(command)
}
