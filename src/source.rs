use std::future::Future;

use anyhow::Result;
use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// One wire record from the trivia endpoint, parsed best-effort.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// The fixed request shape for one round: 5 medium multiple-choice
/// questions unless configured otherwise.
#[derive(Debug, Clone)]
pub struct RoundRequest {
    pub amount: u8,
    pub difficulty: Difficulty,
}

impl Default for RoundRequest {
    fn default() -> Self {
        Self {
            amount: 5,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Where raw question batches come from. The controller only ever sees
/// this trait; tests substitute canned sources.
pub trait QuestionSource {
    fn fetch(
        &self,
        request: &RoundRequest,
    ) -> impl Future<Output = Result<Vec<RawQuestion>>> + Send;
}

#[derive(Debug, Clone, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    results: Vec<RawQuestion>,
}

/// The public trivia endpoint. One GET per round, no auth, no paging.
#[derive(Debug, Clone)]
pub struct OpenTrivia {
    api_url: String,
}

impl OpenTrivia {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }
}

impl Default for OpenTrivia {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl QuestionSource for OpenTrivia {
    async fn fetch(&self, request: &RoundRequest) -> Result<Vec<RawQuestion>> {
        let url = Url::parse_with_params(
            &self.api_url,
            &[
                ("amount", request.amount.to_string()),
                ("difficulty", request.difficulty.as_str().to_string()),
                ("type", "multiple".to_string()),
            ],
        )?;

        let response = reqwest::get(url).await?.json::<TriviaResponse>().await?;
        // the endpoint reports "not enough questions" and friends
        // through this field while still answering HTTP 200
        if response.response_code != 0 {
            anyhow::bail!("trivia endpoint returned code {}", response.response_code);
        }
        log::debug!("fetched {} raw questions", response.results.len());

        Ok(response.results)
    }
}
