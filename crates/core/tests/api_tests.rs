//! Library API integration tests
use postcraft_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

fn http_extractor() -> Extractor {
    Extractor::new(FetchConfig { timeout: 5, ..Default::default() }).unwrap()
}

async fn serve(server: &mut mockito::ServerGuard, path: &str, status: usize, body: String) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_extract_article_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = serve(&mut server, "/posts/slm", 200, read_fixture("article.html")).await;

    let article = http_extractor().extract(&format!("{}/posts/slm", server.url())).await.unwrap();

    assert_eq!(article.title, "Why Small Language Models Matter");
    assert_eq!(article.author, "Priya Raman");
    assert_eq!(article.date, "2024-09-12T08:00:00Z");
    assert!(article.content.contains("Small language models are quietly changing"));
    assert!(article.content.contains("keep a small model in the loop"));
    assert!(article.summary.ends_with('.'));
    assert!(article.keywords.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_drops_boilerplate_tables_and_comments() {
    let mut server = mockito::Server::new_async().await;
    let _mock = serve(&mut server, "/posts/slm", 200, read_fixture("article.html")).await;

    let article = http_extractor().extract(&format!("{}/posts/slm", server.url())).await.unwrap();

    for unwanted in ["Trending", "All rights reserved", "Tiny-A", "ad slot", "Great read", "Subscribe"] {
        assert!(!article.content.contains(unwanted), "content should not contain {unwanted:?}");
    }
}

#[tokio::test]
async fn test_fetch_failure_is_never_an_article() {
    let mut server = mockito::Server::new_async().await;
    let _mock = serve(&mut server, "/missing", 404, "Not Found".to_string()).await;

    let err = http_extractor().extract(&format!("{}/missing", server.url())).await.unwrap_err();

    assert_eq!(err.kind, ExtractionErrorKind::Fetch);
    assert_eq!(err.message, "Failed to fetch URL. The link might be broken or the server is blocking requests.");
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_failure() {
    let err = http_extractor().extract("http://127.0.0.1:1/unreachable").await.unwrap_err();
    assert_eq!(err.kind, ExtractionErrorKind::Fetch);
}

#[tokio::test]
async fn test_malformed_url_is_fetch_failure() {
    let err = http_extractor().extract("not a url").await.unwrap_err();
    assert_eq!(err.kind, ExtractionErrorKind::Fetch);
}

#[tokio::test]
async fn test_empty_content_differs_from_fetch_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = serve(&mut server, "/app", 200, read_fixture("empty_content.html")).await;

    let err = http_extractor().extract(&format!("{}/app", server.url())).await.unwrap_err();

    assert_eq!(err.kind, ExtractionErrorKind::Content);
    assert_ne!(err.message, ExtractionError::FETCH_MESSAGE);
    assert_eq!(
        err.message,
        "Failed to extract main content from the page. The page might be heavily JavaScript-based or protected."
    );
}

#[test]
fn test_missing_metadata_uses_sentinels() {
    let article = http_extractor().extract_html(&read_fixture("no_metadata.html")).unwrap();

    assert_eq!(article.title, "No Title Found");
    assert_eq!(article.author, "Unknown Author");
    assert_eq!(article.date, "Unknown Date");
    assert!(!article.content.is_empty());
    assert!(article.content.starts_with("Vector databases store embeddings"));
}

#[tokio::test]
async fn test_extract_form_wrapped_page() {
    let mut server = mockito::Server::new_async().await;
    let _mock = serve(&mut server, "/Article.aspx", 200, read_fixture("form_wrapped.html")).await;

    let article = http_extractor().extract(&format!("{}/Article.aspx", server.url())).await.unwrap();

    assert_eq!(article.title, "Retrieval Beats Fine-Tuning for Fresh Facts");
    assert_eq!(article.author, "Tomas Okafor");
    assert_eq!(article.date, "2024-11-03T09:15:00Z");
    assert!(article.content.contains("Retrieval-augmented generation sidesteps that problem"));
    assert!(article.content.contains("lightly tuned model"));
    assert!(!article.content.contains("dDwtMTA4NzE5NzQ0Nzs7Pg"));
}

#[test]
fn test_extractor_builder() {
    let config = ExtractorConfig::builder().min_score(10.0).char_threshold(300).build();
    let extractor = Extractor::with_source(HttpFetcher::new(FetchConfig::default()).unwrap(), config);

    let article = extractor.extract_html(&read_fixture("article.html")).unwrap();
    assert!(!article.content.is_empty());
}

#[test]
fn test_article_json_shape() {
    let article = http_extractor().extract_html(&read_fixture("article.html")).unwrap();
    let json = serde_json::to_value(&article).unwrap();

    for field in ["title", "author", "date", "summary", "keywords", "content"] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}

#[tokio::test]
async fn test_compose_with_gemini_truncates_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(mockito::Matcher::Regex("[^Q]Q{4000}\\\\n---".to_string()))
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "  Long reads, short posts. #ai  "}]}}]}"#)
        .create_async()
        .await;

    let model = GeminiClient::new("test-key", "gemini-1.5-flash").unwrap().with_base_url(server.url());
    let composer = Composer::new(model);
    let source = ManualInput::new("Long article", "Q".repeat(10_000));

    let post = composer.compose(&source, Tone::Inspirational, DEFAULT_AUDIENCE).await;

    assert_eq!(post, "Long reads, short posts. #ai");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_compose_api_error_is_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(429)
        .with_body(r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#)
        .create_async()
        .await;

    let model = GeminiClient::new("test-key", "gemini-1.5-flash").unwrap().with_base_url(server.url());
    let post = Composer::new(model).compose(&ManualInput::new("t", "c"), Tone::Casual, "").await;

    assert_eq!(post, "An error occurred with the Google API: 429 Resource has been exhausted");
}

#[tokio::test]
async fn test_always_refusing_model_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .expect(2)
        .create_async()
        .await;

    let model = GeminiClient::new("test-key", "gemini-1.5-flash").unwrap().with_base_url(server.url());
    let composer = Composer::new(model);
    let source = ManualInput::new("Topic", "Context");

    let first = composer.compose(&source, Tone::Formal, "Executives").await;
    let second = composer.compose(&source, Tone::Formal, "Executives").await;

    assert_eq!(first, REFUSAL_MESSAGE);
    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_scenario_fetch_failure_then_manual_post() {
    let mut server = mockito::Server::new_async().await;
    let _blocked = serve(&mut server, "/blocked", 403, "Forbidden".to_string()).await;

    let model = MockModel::new("Will AI take our jobs, or make them better? #AI #Ethics #FutureOfWork");
    let mut controller = Controller::new(http_extractor(), Composer::new(model.clone()));

    let render = controller.submit_url(&format!("{}/blocked", server.url()), Tone::Witty, DEFAULT_AUDIENCE).await;
    assert_eq!(render, Render::Fallback { error_message: ExtractionError::FETCH_MESSAGE.to_string() });
    assert_eq!(
        controller.state(),
        &SessionState::AwaitingManualInput { error_message: ExtractionError::FETCH_MESSAGE.to_string() }
    );
    assert_eq!(model.call_count(), 0);

    let render = controller
        .submit_manual("The Future of Generative AI", "Mentions job displacement and ethics.", Tone::Witty, "AI/ML professionals")
        .await;

    let prompt = model.last_prompt().unwrap();
    assert!(prompt.contains("The Future of Generative AI"));
    assert!(prompt.contains("Mentions job displacement and ethics."));
    assert!(prompt.contains("Witty"));
    assert!(prompt.contains("AI/ML professionals"));

    assert_eq!(
        render,
        Render::Post {
            text: "Will AI take our jobs, or make them better? #AI #Ethics #FutureOfWork".to_string(),
            success: true
        }
    );
    assert_eq!(controller.state(), &SessionState::AwaitingUrl);
}

#[tokio::test]
async fn test_scenario_url_to_post() {
    let mut server = mockito::Server::new_async().await;
    let page = serve(&mut server, "/posts/slm", 200, read_fixture("article.html")).await;

    let model = MockModel::new("Small models, big wins. #AI #MLOps #LLM");
    let mut controller = Controller::new(http_extractor(), Composer::new(model.clone()));

    let render = controller.submit_url(&format!("{}/posts/slm", server.url()), Tone::Professional, "CTOs").await;

    assert_eq!(render, Render::Post { text: "Small models, big wins. #AI #MLOps #LLM".to_string(), success: true });
    assert!(model.last_prompt().unwrap().contains("**Title/Topic:** Why Small Language Models Matter"));
    assert_eq!(controller.state(), &SessionState::AwaitingUrl);
    page.assert_async().await;
}

#[tokio::test]
async fn test_empty_url_makes_no_requests() {
    let mut server = mockito::Server::new_async().await;
    let page = server.mock("GET", mockito::Matcher::Any).expect(0).create_async().await;

    let model = MockModel::default();
    let mut controller = Controller::new(http_extractor(), Composer::new(model.clone()));

    let render = controller.submit_url("", Tone::Professional, "").await;

    assert_eq!(render, Render::Warning("Please enter a URL.".to_string()));
    assert_eq!(model.call_count(), 0);
    page.assert_async().await;
}
