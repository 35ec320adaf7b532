use reportroute_common::Result;
use reportroute_llm::{CompletionClient, CompletionRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::prompts;
use crate::schema::{ReportData, ReportTemplate};

/// Converts free text into a structured report following a caller-supplied template
pub struct Extractor {
    client: Arc<dyn CompletionClient>,
}

impl Extractor {
    /// Create new extractor with an injected completion client
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Extract a structured report from text.
    ///
    /// The completion reply is salvaged into a JSON object (falling back
    /// to `{"text": <reply>}` when no object can be parsed), then repaired
    /// so every template field is present. A failing completion call is
    /// fatal and propagates to the caller.
    pub async fn extract(&self, text: &str, template: &ReportTemplate) -> Result<ReportData> {
        let prompt = prompts::report_prompt(&template.render_fields(), text);

        debug!(
            "Extracting report - Text length: {}, Fields: {}",
            text.len(),
            template.fields.len()
        );

        let reply = self
            .client
            .complete(CompletionRequest::new(
                prompts::REPORT_SYSTEM_PROMPT,
                prompt,
                prompts::REPORT_TEMPERATURE,
            ))
            .await?;

        let mut report = salvage_object(reply.trim());
        repair(&mut report, template);

        Ok(report)
    }
}

/// Best-effort extraction of a JSON object from a free-text reply.
///
/// Takes the substring from the first `{` to the last `}` and parses it.
/// Replies without a parseable object degrade to `{"text": <reply>}`
/// instead of failing.
pub fn salvage_object(reply: &str) -> ReportData {
    if let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) {
        if end > start {
            if let Ok(object) = serde_json::from_str::<ReportData>(&reply[start..=end]) {
                return object;
            }
        }
    }

    debug!("Reply contained no JSON object, keeping raw text");
    let mut fallback = ReportData::new();
    fallback.insert("text".to_string(), Value::String(reply.to_string()));
    fallback
}

/// Insert a default value for every template field missing from the report:
/// an empty list for array fields, an empty string otherwise.
/// Keys not declared in the template pass through untouched.
pub fn repair(report: &mut ReportData, template: &ReportTemplate) {
    for (name, descriptor) in &template.fields {
        if !report.contains_key(name) {
            let default = if descriptor.kind.is_array() {
                Value::Array(Vec::new())
            } else {
                Value::String(String::new())
            };
            report.insert(name.clone(), default);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, FieldKind};
    use crate::test_util::ScriptedClient;
    use reportroute_common::ReportRouteError;

    fn sample_template() -> ReportTemplate {
        ReportTemplate::new()
            .with_field("title", FieldDescriptor::new(FieldKind::String, "제목"))
            .with_field("tags", FieldDescriptor::new(FieldKind::Array, "태그"))
    }

    #[test]
    fn test_salvage_plain_object() {
        let report = salvage_object(r#"{"title": "주간 회의"}"#);
        assert_eq!(report["title"], "주간 회의");
    }

    #[test]
    fn test_salvage_object_wrapped_in_prose() {
        let report = salvage_object("Sure! ```json\n{\"title\": \"Weekly Sync\"}\n```");
        assert_eq!(report.len(), 1);
        assert_eq!(report["title"], "Weekly Sync");
    }

    #[test]
    fn test_salvage_without_braces_falls_back_to_text() {
        let report = salvage_object("I cannot process this.");
        assert_eq!(report.len(), 1);
        assert_eq!(report["text"], "I cannot process this.");
    }

    #[test]
    fn test_salvage_unparseable_braces_falls_back_to_text() {
        let reply = "{this is not json}";
        let report = salvage_object(reply);
        assert_eq!(report["text"], reply);
    }

    #[test]
    fn test_salvage_brace_after_close_falls_back() {
        let reply = "} weird {";
        let report = salvage_object(reply);
        assert_eq!(report["text"], reply);
    }

    #[test]
    fn test_repair_inserts_defaults() {
        let template = sample_template();
        let mut report = ReportData::new();
        report.insert("title".to_string(), Value::String("제목".to_string()));

        repair(&mut report, &template);

        assert_eq!(report["title"], "제목");
        assert_eq!(report["tags"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_repair_defaults_non_array_to_empty_string() {
        let template = ReportTemplate::new()
            .with_field("count", FieldDescriptor::new(FieldKind::Number, "개수"))
            .with_field("meta", FieldDescriptor::new(FieldKind::Object, "메타"));

        let mut report = ReportData::new();
        repair(&mut report, &template);

        // Only the array/non-array split matters: number and object
        // fields both default to an empty string.
        assert_eq!(report["count"], "");
        assert_eq!(report["meta"], "");
    }

    #[test]
    fn test_repair_keeps_undeclared_keys() {
        let template = sample_template();
        let mut report = ReportData::new();
        report.insert("extra".to_string(), Value::String("pass through".to_string()));

        repair(&mut report, &template);

        assert_eq!(report["extra"], "pass through");
        assert!(report.contains_key("title"));
        assert!(report.contains_key("tags"));
    }

    #[test]
    fn test_repair_is_idempotent() {
        let template = sample_template();
        let mut report = salvage_object("no json here");
        repair(&mut report, &template);

        let once = report.clone();
        repair(&mut report, &template);
        assert_eq!(report, once);
    }

    #[tokio::test]
    async fn test_extract_repairs_fenced_reply() {
        let client = Arc::new(ScriptedClient::replying(
            "Sure! ```json\n{\"title\": \"Weekly Sync\"}\n```",
        ));
        let extractor = Extractor::new(client);

        let report = extractor.extract("회의록", &sample_template()).await.unwrap();
        assert_eq!(report["title"], "Weekly Sync");
        assert_eq!(report["tags"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn test_extract_brace_free_reply_unions_defaults() {
        let client = Arc::new(ScriptedClient::replying("I cannot process this."));
        let extractor = Extractor::new(client);

        let report = extractor.extract("회의록", &sample_template()).await.unwrap();
        assert_eq!(report["text"], "I cannot process this.");
        assert_eq!(report["title"], "");
        assert_eq!(report["tags"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn test_extract_accepts_empty_template() {
        let client = Arc::new(ScriptedClient::replying("anything at all"));
        let extractor = Extractor::new(client);

        let report = extractor.extract("텍스트", &ReportTemplate::new()).await.unwrap();
        assert_eq!(report["text"], "anything at all");
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_propagates_oracle_failure() {
        let client = Arc::new(ScriptedClient::new(vec![Err(ReportRouteError::llm(
            "quota exceeded",
        ))]));
        let extractor = Extractor::new(client);

        let result = extractor.extract("텍스트", &sample_template()).await;
        assert!(matches!(result, Err(ReportRouteError::Llm(_))));
    }

    #[tokio::test]
    async fn test_extract_uses_low_temperature_and_schema_prompt() {
        let client = Arc::new(ScriptedClient::replying("{}"));
        let extractor = Extractor::new(client.clone());

        extractor.extract("회의록", &sample_template()).await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, prompts::REPORT_TEMPERATURE);
        assert!(requests[0].prompt.contains("\"title\""));
        assert!(requests[0].prompt.contains("회의록"));
        assert_eq!(
            requests[0].system.as_deref(),
            Some(prompts::REPORT_SYSTEM_PROMPT)
        );
    }
}
