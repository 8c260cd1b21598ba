//! Report requests and the prompt encoding they use.
//!
//! The reporting service calls its query parameters "prompts".
//! Multi-valued prompts follow an upstream convention: each value is
//! trimmed, internal whitespace collapses to underscores, and the
//! values are joined with `!`.

use tracing::debug;
use url::Url;

use crate::client::AuthClient;
use crate::error::{Error, Result};

/// Output format for a report fetch.
///
/// The service defaults to XML when no `format` query parameter is
/// present, so [`Format::Xml`] sends none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON body, requested with `format=json`.
    Json,
    /// XML body, the server default.
    Xml,
    /// CSV body, requested with `format=csv`.
    Csv,
}

impl Format {
    /// Query parameter value for this format, if one is sent at all.
    const fn query_value(self) -> Option<&'static str> {
        match self {
            Self::Json => Some("json"),
            Self::Xml => None,
            Self::Csv => Some("csv"),
        }
    }
}

/// Encodes a list of prompt values into the service's multi-value form.
///
/// Each value is trimmed and its internal whitespace collapsed to
/// underscores, then the values are joined with `!`.
#[must_use]
pub fn join_values<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|value| {
            value
                .as_ref()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
        })
        .collect::<Vec<_>>()
        .join("!")
}

/// Conversion accepted by [`ReportRequest::param`].
///
/// Single strings pass through unchanged. Lists of strings are encoded
/// with [`join_values`].
pub trait ParamValue {
    /// Converts the value into its query-string form.
    fn into_value(self) -> String;
}

impl ParamValue for String {
    fn into_value(self) -> String {
        self
    }
}

impl ParamValue for &str {
    fn into_value(self) -> String {
        self.to_owned()
    }
}

impl ParamValue for &String {
    fn into_value(self) -> String {
        self.clone()
    }
}

impl<S: AsRef<str>> ParamValue for &[S] {
    fn into_value(self) -> String {
        join_values(self)
    }
}

impl<S: AsRef<str>, const N: usize> ParamValue for [S; N] {
    fn into_value(self) -> String {
        join_values(&self)
    }
}

impl<S: AsRef<str>, const N: usize> ParamValue for &[S; N] {
    fn into_value(self) -> String {
        join_values(self)
    }
}

impl<S: AsRef<str>> ParamValue for Vec<S> {
    fn into_value(self) -> String {
        join_values(&self)
    }
}

/// Builder for authenticated report fetches.
///
/// Parameters accumulate in insertion order and survive the terminal
/// calls, so one builder can fetch the same report in several formats.
/// The final URL is assembled fresh on every send and the stored
/// parameter list is never mutated by a fetch.
#[derive(Debug)]
pub struct ReportRequest<'a> {
    client: &'a AuthClient,
    url: Url,
    params: Vec<(String, String)>,
}

impl<'a> ReportRequest<'a> {
    /// Binds a request to its owning client and target endpoint.
    pub(crate) fn new(client: &'a AuthClient, url: Url) -> Self {
        Self {
            client,
            url,
            params: Vec::new(),
        }
    }

    /// Appends a query parameter.
    ///
    /// Accepts a single string as-is, or a list of strings which is
    /// encoded with [`join_values`].
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ParamValue) -> Self {
        self.params.push((key.into(), value.into_value()));
        self
    }

    /// Fetches the report as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication or the fetch fails.
    pub async fn json(&self) -> Result<String> {
        self.fetch(Format::Json).await
    }

    /// Fetches the report as XML text, the server default.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication or the fetch fails.
    pub async fn xml(&self) -> Result<String> {
        self.fetch(Format::Xml).await
    }

    /// Fetches the report as CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication or the fetch fails.
    pub async fn csv(&self) -> Result<String> {
        self.fetch(Format::Csv).await
    }

    /// Fetches the report as JSON and parses the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the body is not valid JSON, plus any
    /// error [`Self::json`] can return.
    pub async fn json_value(&self) -> Result<serde_json::Value> {
        let body = self.json().await?;
        serde_json::from_str(&body).map_err(Into::into)
    }

    /// Fetches the report in the given format and returns the raw
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Report`] when the endpoint answers with a
    /// non-success status, and any authentication error from the
    /// owning client.
    pub async fn fetch(&self, format: Format) -> Result<String> {
        let token = self.client.authenticate().await?;
        let url = self.build_url(format);
        debug!("Fetching {format:?} report from {url}");

        let response = self.client.http.get(url).bearer_auth(&token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(Error::Report { status, body });
        }

        response.text().await.map_err(Into::into)
    }

    /// Builds the final URL from the stored parameters plus the format
    /// parameter for this call.
    fn build_url(&self, format: Format) -> Url {
        let mut url = self.url.clone();
        let format_value = format.query_value();

        // Skip the serializer entirely when there is nothing to append,
        // otherwise the URL gains a dangling `?`.
        if !self.params.is_empty() || format_value.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
            if let Some(value) = format_value {
                pairs.append_pair("format", value);
            }
        }

        url
    }
}
