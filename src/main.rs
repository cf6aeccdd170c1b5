use std::{process, sync::Arc};

use postboard::{
    application::{api::PostApi, error::AppError},
    config::{self, Command, ListArgs},
    infra::{http::HttpPostApi, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

mod commands;

use commands::Context;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    let message = error.presentation_message();
    if dispatcher::has_been_set() {
        error!(error = %report.summary(), "{message}");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %report.summary(), "{message}");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let command = cli_args
        .command
        .unwrap_or_else(|| Command::List(ListArgs::default()));

    let api: Arc<dyn PostApi> = Arc::new(HttpPostApi::new(settings.api.base_url.clone())?);
    let ctx = Context { settings, api };

    match command {
        Command::List(args) => commands::run_list(&ctx, args).await,
        Command::Browse(args) => commands::run_browse(&ctx, args).await,
        Command::Show(args) => commands::run_show(&ctx, &args.id).await,
        Command::Delete(args) => commands::run_delete(&ctx, &args.id, args.yes).await,
        Command::Create(fields) => commands::run_create(&ctx, fields).await,
        Command::Edit(args) => commands::run_edit(&ctx, &args.id, args.fields).await,
    }
}
