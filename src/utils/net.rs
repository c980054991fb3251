use std::{collections::HashMap, time::Duration};

use log::debug;
use reqwest::Method;
use reqwest_middleware::ClientBuilder;
use reqwest_retry::{Jitter, RetryTransientMiddleware, policies::ExponentialBackoff};
use url::Url;

use crate::error::{DlError, DlResult};

pub async fn http_get(
    url: &str,
    path: Option<&str>,
    query: &HashMap<String, String>,
    headers: &HashMap<String, String>,
    timeout_secs: u64,
    max_retries: u64,
) -> DlResult<Vec<u8>> {
    let request_url = if let Some(path) = path {
        &join_url(url, path)?
    } else {
        url
    };

    let mut client_builder = ClientBuilder::new(reqwest::Client::new());
    if max_retries > 0 {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(
                Duration::from_secs(1),
                Duration::from_secs(timeout_secs.max(1)),
            )
            .jitter(Jitter::Bounded)
            .base(2)
            .build_with_max_retries(max_retries as u32);
        client_builder =
            client_builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }
    let client = client_builder.build();

    let mut request_builder = client
        .request(Method::GET, request_url)
        .timeout(Duration::from_secs(timeout_secs));
    request_builder = request_builder.query(query);

    for (k, v) in headers {
        request_builder = request_builder.header(k, v);
    }

    let response = request_builder
        .send()
        .await
        .map_err(|err| redact_send_error(err, request_url, query))?;

    if response.status().is_success() {
        let bytes = response
            .bytes()
            .await
            .map_err(|err| DlError::HttpRequestError(err.without_url()))?;

        Ok(bytes.to_vec())
    } else {
        // The query string carries the access key, so only the path is reported
        let request = path.unwrap_or_default().to_string();
        debug!("[HTTP Status Error] [{request}] {}", response.status());

        Err(DlError::HttpStatusError {
            status: response.status().to_string(),
            request,
        })
    }
}

/// Transport errors print the request URL, whose query carries the access key.
fn redact_send_error(
    err: reqwest_middleware::Error,
    url: &str,
    query: &HashMap<String, String>,
) -> DlError {
    match err {
        reqwest_middleware::Error::Reqwest(err) => DlError::HttpRequestError(err.without_url()),
        reqwest_middleware::Error::Middleware(err) => {
            let mut message = format!("{err:#}");
            if let Ok(full_url) = Url::parse_with_params(url, query.iter()) {
                message = message.replace(full_url.as_str(), url);
            }
            for value in query.values().filter(|v| !v.is_empty()) {
                message = message.replace(value.as_str(), "***");
            }

            DlError::HttpMiddlewareError(message)
        }
    }
}

pub fn join_url(base_url: &str, extend_url: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base_url)?;

    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(extend_url.split('/').filter(|s| !s.is_empty()));

    Ok(url.to_string())
}
