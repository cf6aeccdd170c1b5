use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;

const PAGE_ONE: &str = r#"{
    "data": [
        {"id": "p1", "title": "Hello", "author": "Jane Doe", "description": "First body",
         "imageUrl": "https://picsum.photos/id/1/1368/400", "createdAt": 0, "updatedAt": 0}
    ],
    "pagination": {"_page": 1, "_limit": 6, "_totalRows": 13}
}"#;

const PAGE_TWO: &str = r#"{
    "data": [
        {"id": "p7", "title": "Second page", "author": "Jane Doe", "description": "",
         "imageUrl": "", "createdAt": 0, "updatedAt": 0}
    ],
    "pagination": {"_page": 2, "_limit": 6, "_totalRows": 13}
}"#;

const POST: &str = r#"{"id": "p1", "title": "Hello", "author": "Jane Doe",
    "description": "First body", "imageUrl": "https://picsum.photos/id/1/1368/400",
    "createdAt": 1633700485638, "updatedAt": 1633700485638}"#;

fn postboard(server: &MockServer) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postboard"));
    cmd.env_remove("POSTBOARD_CONFIG_FILE")
        .env_remove("RUST_LOG")
        .arg("--api-url")
        .arg(server.url("/api"));
    cmd
}

#[test]
fn list_prints_cards_and_pagination() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/posts")
            .query_param("_page", "1")
            .query_param("_limit", "6")
            .query_param("title_like", "hello");
        then.status(200)
            .header("content-type", "application/json")
            .body(PAGE_ONE);
    });

    postboard(&server)
        .args(["list", "--search", "hello"])
        .assert()
        .success()
        .stdout(contains(" 1. Hello [p1]"))
        .stdout(contains("image: https://picsum.photos/id/1/1368/400"))
        .stdout(contains("page 1/3  [-] prev  [n] next"));
    mock.assert();
}

#[test]
fn show_prints_the_post_with_an_edit_link() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/posts/p1");
        then.status(200)
            .header("content-type", "application/json")
            .body(POST);
    });

    postboard(&server)
        .args(["show", "p1"])
        .assert()
        .success()
        .stdout(contains("Hello"))
        .stdout(contains("Jane Doe - 08/10/2021 13:41"))
        .stdout(contains("edit: add-edit-post.html?id=p1"));
    mock.assert();
}

#[test]
fn show_missing_post_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/nope");
        then.status(404).body("{}");
    });

    postboard(&server)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(contains("Post not found"));
}

#[test]
fn delete_with_yes_skips_the_prompt() {
    let server = MockServer::start();
    let fetch = server.mock(|when, then| {
        when.method("GET").path("/api/posts/p1");
        then.status(200)
            .header("content-type", "application/json")
            .body(POST);
    });
    let remove = server.mock(|when, then| {
        when.method("DELETE").path("/api/posts/p1");
        then.status(200).body("{}");
    });

    postboard(&server)
        .args(["delete", "p1", "--yes"])
        .assert()
        .success()
        .stderr(contains("[success] Remove post successfully"));
    fetch.assert();
    remove.assert();
}

#[test]
fn declined_delete_leaves_the_post() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/p1");
        then.status(200)
            .header("content-type", "application/json")
            .body(POST);
    });
    let remove = server.mock(|when, then| {
        when.method("DELETE").path("/api/posts/p1");
        then.status(200).body("{}");
    });

    postboard(&server)
        .args(["delete", "p1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Are you sure to remove post \"Hello\"?"))
        .stderr(contains("cancelled"));
    remove.assert_calls(0);
}

#[test]
fn create_reports_validation_errors_without_calling_the_api() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/posts");
        then.status(201).body("{}");
    });

    postboard(&server)
        .args(["create", "--author", "Jo"])
        .assert()
        .failure()
        .stderr(contains("title: Please enter title"))
        .stderr(contains("author: Please enter at least two words"))
        .stderr(contains("imageUrl: Please random a background image"));
    create.assert_calls(0);
}

#[test]
fn create_with_random_image_prints_the_saved_post() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/api/posts")
            .json_body_includes(r#"{"title":"Hello","author":"Jane Doe"}"#);
        then.status(201)
            .header("content-type", "application/json")
            .body(POST);
    });

    postboard(&server)
        .args([
            "create",
            "--title",
            "Hello",
            "--author",
            "Jane Doe",
            "--description",
            "First body",
            "--random-image",
        ])
        .assert()
        .success()
        .stdout(contains("\"id\": \"p1\""))
        .stderr(contains("[success] Save post successfully"));
    create.assert();
}

#[test]
fn browse_pages_forward_from_stdin() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method("GET")
            .path("/api/posts")
            .query_param("_page", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(PAGE_ONE);
    });
    let second = server.mock(|when, then| {
        when.method("GET")
            .path("/api/posts")
            .query_param("_page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(PAGE_TWO);
    });

    postboard(&server)
        .arg("browse")
        .write_stdin("n\nq\n")
        .assert()
        .success()
        .stdout(contains("Second page [p7]"))
        .stdout(contains("page 2/3  [p] prev  [n] next"));
    first.assert();
    second.assert();
}
