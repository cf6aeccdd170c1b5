use std::io::Write;

use super::*;

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://localhost:3000/api/");
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.list.default_limit, 6);
    assert_eq!(settings.list.search_debounce, Duration::from_millis(500));
    assert!(!settings.list.clear_on_empty);
    assert_eq!(settings.form.max_upload_bytes, 3 * 1024 * 1024);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://file.example/api/".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        api_url: Some("http://cli.example/api/".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_global_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://cli.example/api/");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn base_url_gains_trailing_slash() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("https://posts.example/api".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.base_url.as_str(), "https://posts.example/api/");
}

#[test]
fn rejects_non_http_base_url() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://posts.example/".to_string());

    let err = Settings::from_raw(raw).expect_err("ftp is rejected");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn rejects_zero_default_limit() {
    let mut raw = RawSettings::default();
    raw.list.default_limit = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero limit is rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "list.default_limit",
            ..
        }
    ));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_global_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn list_overrides_flow_into_list_options() {
    let mut raw = RawSettings::default();
    raw.list.clear_on_empty = Some(false);

    raw.apply_list_overrides(&ListOverrides {
        clear_on_empty: Some(true),
        search_debounce_ms: Some(50),
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.list.search_debounce, Duration::from_millis(50));
    let options = settings.list_options();
    assert!(options.clear_on_empty);
    assert_eq!(options.default_limit, 6);
    assert_eq!(
        options.placeholder_image,
        "https://via.placeholder.com/1280x900?text=thumbnail"
    );
}

#[test]
fn config_file_is_read_and_cli_wins() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[api]\nbase_url = \"http://file.example/api/\"\n\n[list]\ndefault_limit = 12\nclear_on_empty = true"
    )
    .expect("write config");

    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::parse_from(["postboard", "--config-file", &path, "list"]);
    let settings = load(&args).expect("settings load");
    assert_eq!(settings.api.base_url.as_str(), "http://file.example/api/");
    assert_eq!(settings.list.default_limit, 12);
    assert!(settings.list.clear_on_empty);

    let args = CliArgs::parse_from([
        "postboard",
        "--config-file",
        &path,
        "list",
        "--api-url",
        "http://cli.example/",
        "--clear-on-empty",
        "false",
    ]);
    let settings = load(&args).expect("settings load");
    assert_eq!(settings.api.base_url.as_str(), "http://cli.example/");
    assert!(!settings.list.clear_on_empty);
}

#[test]
fn parse_list_arguments() {
    let args = CliArgs::parse_from([
        "postboard",
        "list",
        "--page",
        "2",
        "--limit",
        "10",
        "--search",
        "rust",
        "--filter",
        "author=Jane Doe",
    ]);

    match args.command.expect("list command") {
        Command::List(list) => {
            assert_eq!(list.page, Some(2));
            assert_eq!(list.limit, Some(10));
            assert_eq!(list.search.as_deref(), Some("rust"));
            assert_eq!(
                list.filters,
                vec![("author".to_string(), "Jane Doe".to_string())]
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn malformed_filter_is_rejected() {
    let result = CliArgs::try_parse_from(["postboard", "list", "--filter", "no-equals"]);
    assert!(result.is_err());
}

#[test]
fn parse_delete_arguments() {
    let args = CliArgs::parse_from(["postboard", "delete", "abc", "--yes"]);

    match args.command.expect("delete command") {
        Command::Delete(delete) => {
            assert_eq!(delete.id, "abc");
            assert!(delete.yes);
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_edit_arguments() {
    let args = CliArgs::parse_from([
        "postboard",
        "edit",
        "abc",
        "--title",
        "New title",
        "--image",
        "/tmp/cover.png",
    ]);

    match args.command.expect("edit command") {
        Command::Edit(edit) => {
            assert_eq!(edit.id, "abc");
            assert_eq!(edit.fields.title.as_deref(), Some("New title"));
            assert_eq!(
                edit.fields.image.as_deref(),
                Some(std::path::Path::new("/tmp/cover.png"))
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn image_url_conflicts_with_upload() {
    let result = CliArgs::try_parse_from([
        "postboard",
        "create",
        "--image-url",
        "https://img.example/a.png",
        "--image",
        "/tmp/a.png",
    ]);
    assert!(result.is_err());
}
