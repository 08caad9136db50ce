// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Loading officeholder portraits, falling back to a placeholder
//!

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Shown when there is no portrait or it can't be loaded
pub const PLACEHOLDER_PORTRAIT_URL: &str = "https://via.placeholder.com/150/333/FFF?text=Photo+N/A";

/// The outcome of loading a portrait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Portrait {
    /// The portrait was fetched
    Loaded { url: String, bytes: Vec<u8> },

    /// There was no portrait, or it couldn't be fetched
    Fallback { url: String },
}

impl Portrait {
    fn fallback() -> Self {
        Portrait::Fallback {
            url: String::from(PLACEHOLDER_PORTRAIT_URL),
        }
    }

    /// The URL of whichever image is to be shown
    pub fn url(&self) -> &str {
        match self {
            Portrait::Loaded { url, .. } => url,
            Portrait::Fallback { url } => url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Portrait::Fallback { .. })
    }
}

/// Load a portrait.  Never fails: any problem results in the placeholder.
pub async fn load_portrait(http: &Client, url: Option<&str>) -> Portrait {
    let Some(url) = url else {
        debug!("No portrait URL, using placeholder");
        return Portrait::fallback();
    };

    match fetch_image(http, url).await {
        Ok(bytes) => {
            debug!("Loaded portrait {url} ({} bytes)", bytes.len());
            Portrait::Loaded {
                url: url.to_string(),
                bytes,
            }
        }
        Err(error) => {
            warn!("Could not load portrait {url}: {error}");
            Portrait::fallback()
        }
    }
}

/// Why a portrait couldn't be loaded
#[derive(Debug, Error)]
pub enum PortraitError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// The response wasn't an image (e.g. an HTML error page)
    #[error("Not an image (content type `{0}`)")]
    NotAnImage(String),
}

async fn fetch_image(http: &Client, url: &str) -> Result<Vec<u8>, PortraitError> {
    let response = http.get(url).send().await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("image/") {
        return Err(PortraitError::NotAnImage(content_type));
    }

    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
