//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Runs in an empty directory with no inherited settings so a stray `.env` cannot leak in.
fn cmd(workdir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("postcraft");
    cmd.current_dir(workdir.path())
        .env_remove("LLM_API_KEY")
        .env_remove("GEMINI_MODEL_NAME")
        .env_remove("GEMINI_API_BASE")
        .env_remove("LLM_MODEL")
        .env_remove("RUST_LOG");
    cmd
}

fn with_gemini(cmd: &mut assert_cmd::Command, server: &mockito::ServerGuard) {
    cmd.env("LLM_API_KEY", "test-key")
        .env("GEMINI_MODEL_NAME", "gemini-1.5-flash")
        .env("GEMINI_API_BASE", server.url());
}

fn get_fixture_path(name: &str) -> String {
    format!("{}/../../tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

fn gemini_reply(text: &str) -> String {
    serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

#[test]
fn test_cli_help_lists_subcommands() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("url"))
        .stdout(predicate::str::contains("topic"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("--tone"));
}

#[test]
fn test_cli_rejects_unknown_tone() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["--tone", "sarcastic", "topic", "--topic", "t", "--context", "c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sarcastic"));
}

#[test]
fn test_cli_missing_api_key_halts_startup() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["url", "https://example.com/post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Google API Key not found. Please set LLM_API_KEY in your .env file."));
}

#[test]
fn test_cli_reads_api_key_from_dotenv() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GEMINI_PATH)
        .match_header("x-goog-api-key", "from-dotenv")
        .with_status(200)
        .with_body(gemini_reply("Dotenv works. #config"))
        .create();

    std::fs::write(
        tmp.path().join(".env"),
        format!("LLM_API_KEY=from-dotenv\nGEMINI_MODEL_NAME=gemini-1.5-flash\nGEMINI_API_BASE={}\n", server.url()),
    )
    .unwrap();

    cmd(&tmp)
        .args(["topic", "--topic", "Config", "--context", "Settings come from a .env file."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dotenv works. #config"));

    mock.assert();
}

#[test]
fn test_cli_extract_file_prints_json() {
    let tmp = TempDir::new().unwrap();
    let output = cmd(&tmp)
        .args(["extract", "--file", &get_fixture_path("article.html")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let article: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(article["title"], "Why Small Language Models Matter");
    assert_eq!(article["author"], "Priya Raman");
    assert_eq!(article["keywords"], serde_json::json!([]));
    assert!(article["content"].as_str().unwrap().contains("Small language models"));
}

#[test]
fn test_cli_extract_reports_content_failure() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["extract", "--file", &get_fixture_path("empty_content.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to extract main content from the page."));
}

#[test]
fn test_cli_extract_url() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/posts/slm")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(read_fixture("article.html"))
        .create();

    cmd(&tmp)
        .args(["extract", &format!("{}/posts/slm", server.url())])
        .assert()
        .success()
        .stdout(predicate::str::contains("Why Small Language Models Matter"));

    page.assert();
}

#[test]
fn test_cli_url_writes_post() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/posts/slm")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(read_fixture("article.html"))
        .create();
    let gemini = server
        .mock("POST", GEMINI_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex("Witty".to_string()),
            mockito::Matcher::Regex("Platform engineers".to_string()),
        ]))
        .with_status(200)
        .with_body(gemini_reply("Small models, big wins. #AI #LLM"))
        .create();

    let mut command = cmd(&tmp);
    with_gemini(&mut command, &server);
    command
        .args(["--tone", "witty", "--audience", "Platform engineers"])
        .args(["url", &format!("{}/posts/slm", server.url())])
        .write_stdin("")
        .assert()
        .success()
        .stdout("Small models, big wins. #AI #LLM\n");

    page.assert();
    gemini.assert();
}

#[test]
fn test_cli_url_fetch_failure_without_terminal() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _page = server.mock("GET", "/blocked").with_status(403).create();
    let gemini = server.mock("POST", GEMINI_PATH).expect(0).create();

    let mut command = cmd(&tmp);
    with_gemini(&mut command, &server);
    command
        .args(["url", &format!("{}/blocked", server.url())])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to fetch URL. The link might be broken or the server is blocking requests.",
        ));

    gemini.assert();
}

#[test]
fn test_cli_topic_api_error_is_reported() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _gemini = server
        .mock("POST", GEMINI_PATH)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#)
        .create();

    let mut command = cmd(&tmp);
    with_gemini(&mut command, &server);
    command
        .args(["topic", "--topic", "Ethics", "--context", "Bias in hiring models."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An error occurred with the Google API: 403 API key not valid"));
}

#[test]
fn test_cli_topic_requires_both_fields() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let gemini = server.mock("POST", GEMINI_PATH).expect(0).create();

    let mut command = cmd(&tmp);
    with_gemini(&mut command, &server);
    command
        .args(["topic", "--topic", "Ethics", "--context", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please provide both a topic and context."));

    gemini.assert();
}

#[test]
fn test_cli_interactive_fallback_then_manual_post() {
    let tmp = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _page = server.mock("GET", "/blocked").with_status(403).create();
    let gemini = server
        .mock("POST", GEMINI_PATH)
        .match_body(mockito::Matcher::Regex("The Future of Generative AI".to_string()))
        .with_status(200)
        .with_body(gemini_reply("Will AI take our jobs? #AI #FutureOfWork"))
        .expect(1)
        .create();

    let script = format!(
        "{}/blocked\nThe Future of Generative AI\nMentions job displacement and ethics.\n\n:quit\n",
        server.url()
    );

    let mut command = cmd(&tmp);
    with_gemini(&mut command, &server);
    command
        .env("HOME", tmp.path())
        .arg("interactive")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Will AI take our jobs? #AI #FutureOfWork"))
        .stderr(predicate::str::contains("Failed to fetch URL."));

    gemini.assert();
}

#[test]
fn test_cli_completions_match_flags() {
    let bash = std::fs::read_to_string(concat!(env!("OUT_DIR"), "/completions/postcraft.bash")).unwrap();

    assert!(bash.contains("--user-agent"));
    assert!(!bash.contains("--user_agent"));

    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["--user-agent", "PostcraftTest/1.0", "extract", "--file", &get_fixture_path("article.html")])
        .assert()
        .success();
}
