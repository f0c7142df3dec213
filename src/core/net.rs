// src/core/net.rs
// Blocking JSON GET against the stats API. One request per call, no retries.

use std::time::Instant;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::config::consts::USER_AGENT;
use crate::config::options::FetchOptions;
use crate::error::{FeedError, Result};

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(opts.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: s!(opts.base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `path` starts with '/' and may carry a query string.
    pub fn url_for(&self, path: &str) -> String {
        join!(&self.base_url, path)
    }

    /// GET `base_url + path` and return the raw body text.
    pub fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        let t = Instant::now();
        let resp = self.client.get(&url).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status { status: status.as_u16(), url });
        }
        let body = resp.text()?;
        logd!("GET {} -> {} bytes in {:?}", url, body.len(), t.elapsed());
        Ok(body)
    }

    /// GET and deserialize the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get_text(path)?;
        Ok(serde_json::from_str(&body)?)
    }
}
