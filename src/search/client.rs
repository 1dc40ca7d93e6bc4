// src/search/client.rs
use crate::config::SearchProfile;
use crate::search::error::SearchError;
use crate::search::models::{QueryParams, ResultPage};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use std::time::Duration;

/// Executes one search call against the listing endpoint.
///
/// The orchestrator only sees this trait; transport, encoding and header
/// plumbing stay behind it, which also lets tests script responses.
pub trait SearchClient {
    fn execute(
        &self,
        params: &QueryParams,
        profile: &SearchProfile,
        token: &str,
    ) -> Result<ResultPage, SearchError>;
}

pub struct HttpSearchClient {
    client: Client,
    search_url: String,
}

impl HttpSearchClient {
    pub fn new(search_url: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            search_url: search_url.to_string(),
        })
    }
}

impl SearchClient for HttpSearchClient {
    fn execute(
        &self,
        params: &QueryParams,
        profile: &SearchProfile,
        token: &str,
    ) -> Result<ResultPage, SearchError> {
        let mut request = self
            .client
            .get(&self.search_url)
            .query(&params.to_pairs())
            .header(USER_AGENT, &profile.user_agent)
            .bearer_auth(token);

        for (name, value) in &profile.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().map_err(|e| {
            if e.is_redirect() {
                SearchError::RedirectLoop(e.to_string())
            } else {
                SearchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        response
            .json::<ResultPage>()
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}
