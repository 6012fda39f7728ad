//! Gemini generateContent client.
//!
//! The model is an opaque text-in/text-out collaborator: each method builds
//! one prompt, posts it, and pulls the first candidate's text back out. The
//! grading prompts ask for bare JSON, which is parsed into the typed
//! feedback structs.

use anyhow::{anyhow, Context, Result};
use serde_json::json;

use super::types::{PersonalityFeedback, TechnicalFeedback};

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            endpoint: GEMINI_URL.to_string(),
        }
    }

    /// Points the client at an arbitrary endpoint; tests use an unroutable
    /// address so grading calls fail fast instead of reaching the real API.
    #[cfg(test)]
    pub(crate) fn with_endpoint(api_key: &str, endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Gemini returned {}", response.status()));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .context("Gemini response was not JSON")?;
        let text = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("Gemini response had no candidate text"))?;
        Ok(text.trim().to_string())
    }

    pub async fn feedback(&self, question: &str, answer: &str) -> Result<String> {
        let prompt = format!(
            "Question: {}\nAnswer: {}\nWrite 2-3 sentences of concise, specific feedback \
             on this answer. Mention both a strength and something to improve.",
            question, answer
        );
        self.generate(prompt).await
    }

    pub async fn technical(&self, question: &str, answer: &str) -> Result<TechnicalFeedback> {
        let prompt = format!(
            "Question: {}\nAnswer: {}\n\nTechnical interview rubric:\n\
             - logic (0-5)\n- accuracy (0-5)\n- clarity (0-5)\n\n\
             Return JSON only, feedback as one sentence:\n\
             {{\"logicScore\":n,\"accuracyScore\":n,\"clarityScore\":n,\"feedback\":\"one sentence\"}}",
            question, answer
        );
        let text = self.generate(prompt).await?;
        parse_json_reply(&text).context("technical grading reply was not the expected JSON")
    }

    pub async fn personality(&self, question: &str, answer: &str) -> Result<PersonalityFeedback> {
        let prompt = format!(
            "Question: {}\nAnswer: {}\n\nJudge whether the answer addresses the question. \
             Relevant answers earn 10 points, irrelevant ones 0.\nReturn JSON only:\n\
             {{\"isRelevant\":true,\"pointsAwarded\":10,\"feedback\":\"one sentence\"}}",
            question, answer
        );
        let text = self.generate(prompt).await?;
        parse_json_reply(&text).context("personality grading reply was not the expected JSON")
    }

    pub async fn overall_comment(&self, interview_type: &str, summary: &str) -> Result<String> {
        let prompt = format!(
            "{} interview, overall review.\n{}\n\n\
             Summarize strengths, weaknesses, and what to study next in two concise sentences.",
            interview_type, summary
        );
        self.generate(prompt).await
    }
}

/// Models often wrap the requested JSON in a code fence; strip it before
/// parsing.
fn parse_json_reply<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(inner.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_json_reply() {
        let reply = r#"{"logicScore":4,"accuracyScore":5,"clarityScore":3,"feedback":"Solid."}"#;
        let parsed: TechnicalFeedback = parse_json_reply(reply).unwrap();
        assert_eq!(parsed.logic_score, 4);
        assert_eq!(parsed.accuracy_score, 5);
        assert_eq!(parsed.clarity_score, 3);
    }

    #[test]
    fn test_parse_fenced_json_reply() {
        let reply = "```json\n{\"isRelevant\":true,\"pointsAwarded\":10,\"feedback\":\"ok\"}\n```";
        let parsed: PersonalityFeedback = parse_json_reply(reply).unwrap();
        assert!(parsed.is_relevant);
        assert_eq!(parsed.points_awarded, 10);
    }

    #[test]
    fn test_parse_garbage_reply_errors() {
        let parsed: Result<TechnicalFeedback> = parse_json_reply("I cannot grade this.");
        assert!(parsed.is_err());
    }
}
