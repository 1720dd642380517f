#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;

use crate::{config::PROMPT_TRUNCATE, prompts::truncate_chars};

/// Largest declared `Content-Length` accepted for a submission file.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Bytes read from the body at most; enough for [`PROMPT_TRUNCATE`]
/// characters of UTF-8.
const READ_LIMIT: usize = PROMPT_TRUNCATE * 4;

/// Downloads an attached submission file as text.
///
/// Non-2xx responses, empty bodies and files declared larger than
/// [`MAX_FILE_BYTES`] are errors. Only as many bytes as the prompt can hold
/// are read, and the text is truncated to [`PROMPT_TRUNCATE`] characters.
pub async fn fetch_file_content(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    let mut response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Cannot get url: {url}"))?
        .error_for_status()
        .with_context(|| format!("Unexpected status from {url}"))?;

    if let Some(len) = response.content_length().filter(|len| *len > MAX_FILE_BYTES) {
        bail!("File at {url} is too large ({len} bytes)");
    }

    let mut bytes = Vec::new();
    while bytes.len() < READ_LIMIT {
        let Some(chunk) = response
            .chunk()
            .await
            .with_context(|| format!("Could not read the response body from {url}"))?
        else {
            break;
        };
        bytes.extend_from_slice(&chunk);
    }
    bytes.truncate(READ_LIMIT);

    let body = String::from_utf8_lossy(&bytes);
    if body.trim().is_empty() {
        bail!("File at {url} is empty");
    }

    Ok(truncate_chars(&body, PROMPT_TRUNCATE).to_owned())
}
