use anyhow::{Context, Result};
use contentsync_model::SyncConfig;

/// Build the HTTP client shared by both pipelines.
///
/// Every request made through it is bounded by the configured timeout.
pub fn build_client(config: &SyncConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()
        .context("Failed to build HTTP client")
}

/// GET `url` and return the body as text.
///
/// A non-success status is an error; there are no retries.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;

    let status = response.status();
    anyhow::ensure!(status.is_success(), "HTTP {status} for {url}");

    response.text().await.context("Failed to read response body")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_text_ok() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/page"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = build_client(&SyncConfig::default()).unwrap();
        let body = fetch_text(&client, &format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_text_error_status() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = build_client(&SyncConfig::default()).unwrap();
        let err = fetch_text(&client, &server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("503"), "{err}");
    }

    #[tokio::test]
    async fn test_fetch_text_times_out() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = SyncConfig {
            timeout_secs: 1,
            ..SyncConfig::default()
        };
        let client = build_client(&config).unwrap();
        assert!(fetch_text(&client, &server.uri()).await.is_err());
    }
}
