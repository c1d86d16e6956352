//! Retrieval of the OpenAPI document over HTTP.

use std::time::Duration;

use reqwest::Client;
use tokio::time::{Instant, sleep};
use tracing::debug;

use super::error::{GeneratorError, GeneratorResult};

const INITIAL_POLL_DELAY: Duration = Duration::from_millis(50);
const MAX_POLL_DELAY: Duration = Duration::from_millis(500);
/// Lower bound on the time a single readiness request may take.
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(500);

/// Build the HTTP client used for every request of a generator run.
pub fn http_client() -> GeneratorResult<Client> {
    Client::builder()
        .build()
        .map_err(|source| GeneratorError::ClientBuilder { source })
}

/// Download the document at `url` as text. Any non-2xx status is an error.
pub async fn fetch_document(client: &Client, url: &str) -> GeneratorResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| GeneratorError::Fetch {
            url: url.to_owned(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeneratorError::FetchStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|source| GeneratorError::Fetch {
        url: url.to_owned(),
        source,
    })
}

/// Poll `url` until it answers with a success status or `timeout` elapses.
///
/// At least one request is made, even with a zero timeout. The delay between attempts doubles
/// from 50ms up to 500ms.
pub async fn wait_for_ready(client: &Client, url: &str, timeout: Duration) -> GeneratorResult<()> {
    let deadline = Instant::now() + timeout;
    let mut delay = INITIAL_POLL_DELAY;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let attempt_timeout = remaining.max(MIN_ATTEMPT_TIMEOUT);

        match client.get(url).timeout(attempt_timeout).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url, "endpoint is ready");
                return Ok(());
            }
            Ok(response) => debug!(url, status = %response.status(), "endpoint not ready yet"),
            Err(err) => debug!(url, error = %err, "endpoint not reachable yet"),
        }

        if Instant::now() + delay >= deadline {
            break;
        }
        sleep(delay).await;
        delay = (delay * 2).min(MAX_POLL_DELAY);
    }

    Err(GeneratorError::NotReady {
        url: url.to_owned(),
        timeout,
    })
}
