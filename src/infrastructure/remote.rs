use std::time::Duration;

use tracing::warn;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for remote service calls, with a per-request timeout.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Send a request, retrying transient transport failures with doubling
/// backoff. HTTP error statuses are returned to the caller unretried.
pub async fn send_with_retry(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, reqwest::Error> {
    let mut retries = MAX_ATTEMPTS - 1;
    let mut delay = INITIAL_BACKOFF;

    loop {
        let Some(attempt) = request.try_clone() else {
            // streaming bodies cannot be cloned; single attempt
            return request.send().await;
        };

        match attempt.send().await {
            Ok(response) => return Ok(response),
            Err(e) if retries > 0 && (e.is_connect() || e.is_timeout()) => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis() as u64,
                    "Transient upstream failure, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}
