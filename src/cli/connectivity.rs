//! Remote connectivity for the CLI: parse against a running sqlgate server
//! instead of the in-process registry.

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::program::ParseResult;

/// One HTTP session against a sqlgate server.
pub struct RemoteSession {
    base: String,
    client: reqwest::blocking::Client,
}

impl RemoteSession {
    /// Create a session for a base URL such as `http://127.0.0.1:7979`.
    pub fn connect(base: &str) -> Result<Self> {
        let base = base.trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            bail!("unsupported server URL (expected http:// or https://): {}", base);
        }
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("building HTTP client")?;
        let session = RemoteSession { base, client };
        session.ping()?;
        Ok(session)
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn ping(&self) -> Result<()> {
        let resp = self
            .client
            .get(format!("{}/", self.base))
            .send()
            .with_context(|| format!("connecting to {}", self.base))?;
        if !resp.status().is_success() {
            bail!("server at {} answered status {}", self.base, resp.status());
        }
        Ok(())
    }

    /// Ask the server to parse `sql` with `dialect`.
    pub fn parse(&self, dialect: &str, sql: &str) -> Result<ParseResult> {
        let resp = self
            .client
            .post(format!("{}/parse", self.base))
            .json(&json!({ "dialect": dialect, "sql": sql }))
            .send()
            .with_context(|| format!("posting to {}/parse", self.base))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            bail!("server refused parse ({}): {}", status, body);
        }
        resp.json::<ParseResult>().context("decoding parse result")
    }

    /// List the dialects the server knows.
    pub fn dialects(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .get(format!("{}/dialects", self.base))
            .send()
            .with_context(|| format!("fetching {}/dialects", self.base))?;
        resp.json::<Vec<String>>().context("decoding dialect list")
    }
}
