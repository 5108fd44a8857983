//! services/api/src/adapters/emotion_llm.rs
//!
//! This module contains the adapter for the emotion-scoring LLM.
//! It implements the `EmotionAnalysisService` port from the `core` crate by calling
//! an OpenAI-compatible chat-completion endpoint (OpenRouter by default).

use async_trait::async_trait;
use journal_core::{
    domain::EmotionAnalysis,
    ports::{EmotionAnalysisService, PortError, PortResult},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SYSTEM_INSTRUCTIONS: &str = "You are an AI assistant that analyzes emotional tone in daily journal entries and provides supportive advice.";

const USER_INPUT_TEMPLATE: &str = r#"Please analyze the following diary entry and return the result in JSON format with the following fields:

1. "emotion": an emotion category such as "happy", "sad", "anxious", "hopeful", "frustrated", "calm", "motivated" or "neutral"
2. "score": an integer between 0 and 100 representing the emotional intensity
3. "advice": a short piece of advice in English to help the user process or respond to the emotion

Example format:
{
  "emotion": "happy",
  "score": 85,
  "advice": "Reflect on what made you happy today and try to incorporate more of it tomorrow."
}

Diary entry:
{entry}
"#;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// The JSON object the model is asked to produce.
#[derive(Deserialize)]
struct AnalysisPayload {
    emotion: String,
    score: i64,
    advice: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `EmotionAnalysisService` using a chat-completion LLM.
#[derive(Clone)]
pub struct ChatCompletionEmotionAdapter {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl ChatCompletionEmotionAdapter {
    /// Creates a new `ChatCompletionEmotionAdapter`.
    pub fn new(http: reqwest::Client, api_base: String, api_key: String, model: String) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

//=========================================================================================
// `EmotionAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl EmotionAnalysisService for ChatCompletionEmotionAdapter {
    /// Sends one chat-completion request and parses the JSON analysis out of the reply.
    async fn analyze_emotion(&self, content: &str) -> PortResult<EmotionAnalysis> {
        let prompt = USER_INPUT_TEMPLATE.replace("{entry}", content);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTIONS,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;
        if !status.is_success() {
            return Err(PortError::Upstream(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| PortError::Parse(format!("malformed completion response: {}", e)))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Parse("Emotion LLM returned no choices in its response.".to_string())
            })?;

        debug!(model = %self.model, "emotion LLM reply: {}", reply);
        parse_analysis(&reply)
    }
}

//=========================================================================================
// Reply Parsing
//=========================================================================================

/// Extracts the `{emotion, score, advice}` object from the model's free-text reply.
///
/// The whole reply is tried first; failing that, the span from the first `{` to the
/// last `}` (models like to wrap JSON in prose or code fences).
pub fn parse_analysis(reply: &str) -> PortResult<EmotionAnalysis> {
    let trimmed = reply.trim();
    let payload = match serde_json::from_str::<AnalysisPayload>(trimmed) {
        Ok(payload) => payload,
        Err(first_err) => {
            let embedded = match (trimmed.find('{'), trimmed.rfind('}')) {
                (Some(start), Some(end)) if start < end => &trimmed[start..=end],
                _ => {
                    return Err(PortError::Parse(format!(
                        "reply is not a JSON object: {}",
                        first_err
                    )))
                }
            };
            serde_json::from_str::<AnalysisPayload>(embedded)
                .map_err(|e| PortError::Parse(format!("reply does not match analysis shape: {}", e)))?
        }
    };

    if !(0..=100).contains(&payload.score) {
        return Err(PortError::Parse(format!(
            "score {} is outside 0..=100",
            payload.score
        )));
    }

    Ok(EmotionAnalysis {
        emotion: payload.emotion,
        score: payload.score,
        advice: payload.advice,
    })
}
