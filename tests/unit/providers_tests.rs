/*!
 * Tests for provider implementations against a local HTTP stub
 */

use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use xliff_translator::errors::ProviderError;
use xliff_translator::providers::google::{GoogleCloudTranslate, GoogleTranslate};
use xliff_translator::providers::mock::MockProvider;
use xliff_translator::providers::Provider;

/// Serve one canned HTTP response and return the endpoint plus the captured request
async fn serve_once(status: &str, body: &str) -> Result<(String, tokio::task::JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = format!("http://{}/translate", listener.local_addr()?);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    Ok((endpoint, handle))
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];
    loop {
        let read = socket.read(&mut buffer).await.unwrap();
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..read]);

        let text = String::from_utf8_lossy(&data).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let lower = line.to_lowercase();
                    lower
                        .strip_prefix("content-length:")
                        .and_then(|value| value.trim().parse::<usize>().ok())
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

/// Test the web endpoint round trip
#[tokio::test]
async fn test_googleTranslate_withStubServer_shouldReturnTranslation() -> Result<()> {
    let (endpoint, server) =
        serve_once("200 OK", r#"[[["Bonjour le monde","Hello world",null,null,10]],null,"en"]"#).await?;
    let provider = GoogleTranslate::with_endpoint(endpoint, 5);

    let translated = provider.translate("Hello world", "auto", "fr").await?;

    assert_eq!(translated, "Bonjour le monde");
    let request = server.await?;
    assert!(request.starts_with("GET /translate?"));
    assert!(request.contains("sl=auto"));
    assert!(request.contains("q=Hello+world"));
    Ok(())
}

/// Test that a rate limit answer is reported as such
#[tokio::test]
async fn test_googleTranslate_withTooManyRequests_shouldReportRateLimit() -> Result<()> {
    let (endpoint, _server) = serve_once("429 Too Many Requests", "slow down").await?;
    let provider = GoogleTranslate::with_endpoint(endpoint, 5);

    let result = provider.translate("Hello", "en", "fr").await;

    assert!(matches!(result, Err(ProviderError::RateLimitExceeded(_))));
    Ok(())
}

/// Test the cloud API round trip
#[tokio::test]
async fn test_googleCloudTranslate_withStubServer_shouldPostJson() -> Result<()> {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"data":{"translations":[{"translatedText":"Hallo"}]}}"#,
    )
    .await?;
    let provider = GoogleCloudTranslate::with_endpoint(endpoint, "secret", 5);

    let translated = provider.translate("Hello", "auto", "de").await?;

    assert_eq!(translated, "Hallo");
    let request = server.await?;
    assert!(request.starts_with("POST /translate?key=secret"));
    assert!(request.contains(r#""target":"de""#));
    assert!(!request.contains(r#""source""#));
    Ok(())
}

/// Test that an invalid key is reported as an authentication error
#[tokio::test]
async fn test_googleCloudTranslate_withForbidden_shouldReportAuthentication() -> Result<()> {
    let (endpoint, _server) = serve_once("403 Forbidden", r#"{"error":"bad key"}"#).await?;
    let provider = GoogleCloudTranslate::with_endpoint(endpoint, "wrong", 5);

    let result = provider.translate("Hello", "en", "de").await;

    assert!(matches!(result, Err(ProviderError::AuthenticationError(_))));
    Ok(())
}

/// Test that an unreachable endpoint fails without panicking
#[tokio::test]
async fn test_googleTranslate_withUnreachableEndpoint_shouldFail() {
    let provider = GoogleTranslate::with_endpoint("http://127.0.0.1:9/translate", 2);

    let result = provider.translate("Hello", "en", "fr").await;

    assert!(matches!(
        result,
        Err(ProviderError::ConnectionError(_)) | Err(ProviderError::RequestFailed(_))
    ));
}

/// Test that mock clones share their request counter
#[tokio::test]
async fn test_mockProvider_clones_shouldShareRequestCount() -> Result<()> {
    let provider = MockProvider::working();
    let clone = provider.clone();

    clone.translate("a", "en", "fr").await?;
    provider.translate("b", "en", "fr").await?;

    assert_eq!(provider.request_count(), 2);
    assert_eq!(clone.name(), "Mock");
    Ok(())
}

/// Test the mock from synchronous code
#[test]
fn test_mockProvider_withFailOn_shouldFailOnlyThatText() {
    let provider = MockProvider::echo().fail_on("bad");

    let good = tokio_test::block_on(provider.translate("good", "en", "fr"));
    let bad = tokio_test::block_on(provider.translate("bad", "en", "fr"));

    assert_eq!(good.unwrap(), "good");
    assert!(matches!(bad, Err(ProviderError::TranslationNotFound(_))));
}
