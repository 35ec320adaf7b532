use reportroute_common::Result;
use reportroute_llm::{CompletionClient, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::extract::Extractor;
use crate::prompts;
use crate::schema::{FieldDescriptor, FieldKind, ReportData, ReportTemplate};

/// Summary options supplied by the caller.
///
/// Values are echoed back unchanged in the result; unrecognized values
/// only affect which prompt fragment is used (see `prompts`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Summary length: "short", "medium", "long"
    #[serde(default = "default_length")]
    pub length: String,

    /// Summary focus: "general", "key_points", "action_items"
    #[serde(default = "default_focus")]
    pub focus: String,

    /// Summary language: "ko", "en", "ja", ...
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_length() -> String {
    "medium".to_string()
}

fn default_focus() -> String {
    "general".to_string()
}

fn default_language() -> String {
    "ko".to_string()
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            length: default_length(),
            focus: default_focus(),
            language: default_language(),
        }
    }
}

/// Summarization result: the summary text, the structured report built
/// from it, and the caller's options echoed back
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    /// Summary text (or a diagnostic string if the summary call failed)
    pub summary: String,

    /// Structured report extracted from the summary
    pub report: ReportData,

    /// Options as the caller supplied them
    pub options: SummaryOptions,
}

/// The fixed template used to structure every summary into a report
pub fn report_template() -> ReportTemplate {
    ReportTemplate::new()
        .with_field("title", FieldDescriptor::new(FieldKind::String, "보고서 제목"))
        .with_field("summary", FieldDescriptor::new(FieldKind::String, "요약 내용"))
        .with_field(
            "key_points",
            FieldDescriptor::new(FieldKind::Array, "주요 포인트 목록"),
        )
        .with_field(
            "action_items",
            FieldDescriptor::new(FieldKind::Array, "필요한 조치 사항 목록"),
        )
        .with_field(
            "additional_notes",
            FieldDescriptor::new(FieldKind::String, "추가 참고사항"),
        )
}

/// Summarizes text and structures the summary into a fixed report form
pub struct Summarizer {
    client: Arc<dyn CompletionClient>,
    extractor: Extractor,
}

impl Summarizer {
    /// Create new summarizer with an injected completion client.
    /// The delegated extraction step shares the same client.
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        let extractor = Extractor::new(client.clone());
        Self { client, extractor }
    }

    /// Summarize text, then extract the fixed report from the summary.
    ///
    /// A failing summarization call is absorbed: the summary becomes a
    /// diagnostic string and the pipeline continues. A failing extraction
    /// call still propagates.
    pub async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<SummaryResult> {
        info!(
            "Starting summarization - Text length: {}, length={}, focus={}, language={}",
            text.len(),
            options.length,
            options.focus,
            options.language
        );

        let prompt =
            prompts::summary_prompt(text, &options.length, &options.focus, &options.language);

        let summary = match self
            .client
            .complete(CompletionRequest::new(
                prompts::SUMMARY_SYSTEM_PROMPT,
                prompt,
                prompts::SUMMARY_TEMPERATURE,
            ))
            .await
        {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!("Summary generation failed, continuing with diagnostic text: {}", e);
                format!("요약 생성 중 오류가 발생했습니다: {}", e)
            }
        };

        debug!("Summary length: {} chars", summary.len());

        let report = self.extractor.extract(&summary, &report_template()).await?;

        Ok(SummaryResult {
            summary,
            report,
            options: options.clone(),
        })
    }
}
