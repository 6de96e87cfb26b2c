//! Image retrieval: HTTP(S) URLs, `file://` URLs or plain paths.
use std::fs;

use log::{debug, info};

use crate::errors::{RecogError, RecogResult};

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn fetch(source: &str) -> RecogResult<Vec<u8>> {
    let bytes = if is_remote(source) {
        fetch_http(source)?
    } else {
        let path = source.strip_prefix("file://").unwrap_or(source);
        fs::read(path).map_err(|e| RecogError::fetch(source, e))?
    };
    debug!("Fetched {} bytes from {}", bytes.len(), source);
    Ok(bytes)
}

fn fetch_http(url: &str) -> RecogResult<Vec<u8>> {
    info!("GET {url}");
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| RecogError::fetch(url, e))?;
    let bytes = response.bytes().map_err(|e| RecogError::fetch(url, e))?;
    Ok(bytes.to_vec())
}
