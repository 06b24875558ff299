use std::process::{Command, Output};

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const BIN: &str = env!("CARGO_BIN_EXE_gptcli");

/// Run the binary with a clean OpenAI environment plus `vars`.
async fn run_cli(args: &[&str], vars: &[(&str, String)]) -> Output {
    let mut command = Command::new(BIN);
    command
        .args(args)
        .current_dir(std::env::temp_dir())
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("OPENAI_MODEL")
        .env_remove("OPENAI_TEMPERATURE")
        .env_remove("RUST_LOG");
    for (name, value) in vars {
        command.env(name, value);
    }

    tokio::task::spawn_blocking(move || command.output())
        .await
        .expect("join")
        .expect("binary runs")
}

fn env_for(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("OPENAI_API_KEY", "sk-test".to_string()),
        ("OPENAI_BASE_URL", format!("{}/v1", server.uri())),
    ]
}

async fn server_replying(body: &'static str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_reply_and_exits_zero() {
    let server = server_replying(r#"{"choices":[{"message":{"content":"This is a test!"}}]}"#).await;

    let output = run_cli(&["Say", "this", "is", "a", "test!"], &env_for(&server)).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "This is a test!\n");

    let requests = server.received_requests().await.expect("recorded requests");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["messages"][0]["content"], "Say this is a test!");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_choices_exit_one_with_raw_body() {
    let server = server_replying(r#"{"choices":[]}"#).await;

    let output = run_cli(&["hello"], &env_for(&server)).await;

    assert_eq!(output.status.code(), Some(1));
    let printed = stdout(&output);
    assert!(printed.contains(": no choices returned:"), "got {printed:?}");
    assert!(printed.contains(r#"{"choices":[]}"#), "got {printed:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_json_exits_one_with_decoding_message() {
    let server = server_replying("this is not json").await;

    let output = run_cli(&["hello"], &env_for(&server)).await;

    assert_eq!(output.status.code(), Some(1));
    let printed = stdout(&output);
    assert!(printed.contains(": unmarshalling response: "), "got {printed:?}");
    assert!(printed.starts_with(BIN), "got {printed:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_api_key_exits_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let vars = [("OPENAI_BASE_URL", format!("{}/v1", server.uri()))];
    let output = run_cli(&["hello"], &vars).await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "required env var $OPENAI_API_KEY is not set\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn no_arguments_prints_usage_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_cli(&[], &env_for(&server)).await;

    assert_eq!(output.status.code(), Some(1));
    let printed = stdout(&output);
    assert!(printed.starts_with("usage: "), "got {printed:?}");
    assert!(printed.trim_end().ends_with("<prompt words>"), "got {printed:?}");
}
