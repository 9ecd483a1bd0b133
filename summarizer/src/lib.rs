//! Retrieval-augmented summarization with a single public function.
//!
//! Public API: [`summarize`]. It retrieves the top policies for the note,
//! builds an extraction-only prompt, asks the completion client, and returns
//! the answer together with the citations used as context.
//!
//! Completion failures that the client has already retried, and malformed
//! responses, are folded into the summary text instead of failing the note.

pub mod api_types;
mod error;
pub mod prompt;

pub use api_types::{SummaryOptions, SummaryOutcome};
pub use error::SummarizerError;

use ai_llm_service::{AiLlmError, CompletionClient, CompletionRequest};
use clinical_text::SectionSet;
use rag_base::{KeywordRetriever, PolicyCorpus};
use tracing::{debug, warn};

/// Inline summary for a 2xx response without usable content.
pub const MALFORMED_RESPONSE: &str = "Error: Unexpected API response format";

/// Summarizes an expanded, de-identified note.
///
/// # Errors
/// [`SummarizerError::Completion`] for failures that are neither exhausted
/// retries nor malformed responses (e.g. a misconfigured client).
pub async fn summarize<C: CompletionClient>(
    client: &C,
    corpus: &PolicyCorpus,
    note: &str,
    sections: &SectionSet,
    opts: &SummaryOptions,
) -> Result<SummaryOutcome, SummarizerError> {
    let policies = KeywordRetriever::new(corpus).retrieve(note, opts.top_k);
    let citations = policies.iter().map(|p| p.to_citation()).collect();

    let user_prompt = prompt::build_user_prompt(note, &policies, sections);
    let mut request = CompletionRequest::new(prompt::SYSTEM_PROMPT, &user_prompt);
    if let Some(max_tokens) = opts.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = opts.temperature {
        request = request.with_temperature(temperature);
    }

    debug!(
        model = client.model(),
        policies = policies.len(),
        prompt_chars = user_prompt.chars().count(),
        "requesting summary"
    );

    match client.complete(request).await {
        Ok(summary) => Ok(SummaryOutcome {
            summary,
            citations,
            degraded: false,
        }),
        Err(err) => {
            let summary = degrade(err)?;
            warn!(model = client.model(), "summary degraded to inline error");
            Ok(SummaryOutcome {
                summary,
                citations,
                degraded: true,
            })
        }
    }
}

/// Maps a completion failure to its inline summary text, or passes it on.
fn degrade(err: AiLlmError) -> Result<String, SummarizerError> {
    match err {
        AiLlmError::RetriesExhausted { attempts, last } => {
            Ok(format!("API Error after {attempts} retries: {last}"))
        }
        e if e.is_malformed_response() => Ok(MALFORMED_RESPONSE.to_string()),
        e => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use ai_llm_service::{ConfigError, ProviderError, ProviderErrorKind};
    use clinical_text::SectionKey;

    use super::*;

    /// Replays canned results and records every request.
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, AiLlmError>>>,
        seen: Mutex<Vec<(String, Option<u32>)>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, AiLlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionClient for ScriptedClient {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, AiLlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((request.prompt.to_string(), request.max_tokens));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn sections() -> SectionSet {
        let mut s = SectionSet::new();
        s.set(SectionKey::Demographics, "40 year old - Gender: female");
        s
    }

    const NOTE: &str = "patient reports chest pain since morning";

    #[tokio::test]
    async fn returns_summary_and_citations() {
        let client = ScriptedClient::new(vec![Ok("**Summary** chest pain".into())]);
        let corpus = PolicyCorpus::standard();

        let out = summarize(&client, &corpus, NOTE, &sections(), &SummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(out.summary, "**Summary** chest pain");
        assert!(!out.degraded);
        assert_eq!(out.citations[0].source, "policy_002");
        assert!(out.citations.len() <= 3);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Patient Demographics: 40 year old - Gender: female"));
        assert_eq!(seen[0].1, None);
    }

    #[tokio::test]
    async fn exhausted_retries_degrade_inline() {
        let last: AiLlmError =
            ProviderError::new("scripted", ProviderErrorKind::Decode("x".into())).into();
        let client = ScriptedClient::new(vec![Err(AiLlmError::RetriesExhausted {
            attempts: 3,
            last: Box::new(last),
        })]);
        let corpus = PolicyCorpus::standard();

        let out = summarize(&client, &corpus, NOTE, &sections(), &SummaryOptions::default())
            .await
            .unwrap();

        assert!(out.degraded);
        assert!(out.summary.starts_with("API Error after 3 retries: "), "{}", out.summary);
        assert!(!out.citations.is_empty());
    }

    #[tokio::test]
    async fn malformed_response_degrades_inline() {
        let client = ScriptedClient::new(vec![Err(ProviderError::new(
            "scripted",
            ProviderErrorKind::EmptyChoices,
        )
        .into())]);
        let corpus = PolicyCorpus::standard();

        let out = summarize(&client, &corpus, NOTE, &sections(), &SummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(out.summary, MALFORMED_RESPONSE);
        assert!(out.degraded);
    }

    #[tokio::test]
    async fn config_errors_propagate() {
        let client = ScriptedClient::new(vec![Err(ConfigError::EmptyModel.into())]);
        let corpus = PolicyCorpus::standard();

        let err = summarize(&client, &corpus, NOTE, &sections(), &SummaryOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizerError::Completion(_)));
    }

    #[tokio::test]
    async fn options_override_request_limits() {
        let client = ScriptedClient::new(vec![Ok("ok".into())]);
        let corpus = PolicyCorpus::standard();
        let opts = SummaryOptions {
            top_k: 1,
            max_tokens: Some(120),
            temperature: None,
        };

        let out = summarize(&client, &corpus, NOTE, &sections(), &opts).await.unwrap();
        assert_eq!(out.citations.len(), 1);
        assert_eq!(client.seen.lock().unwrap()[0].1, Some(120));
    }
}
