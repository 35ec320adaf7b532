//! Prompt templates for report extraction and summarization

/// System instruction for the extraction call
pub const REPORT_SYSTEM_PROMPT: &str = "당신은 텍스트를 구조화된 보고서로 변환하는 전문가입니다.";

/// System instruction for the summarization call
pub const SUMMARY_SYSTEM_PROMPT: &str = "당신은 텍스트를 요약하는 전문가입니다.";

/// Low temperature keeps the extracted field set stable across calls
pub const REPORT_TEMPERATURE: f32 = 0.2;

/// Summaries tolerate slightly more variance
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Prompt for converting text into a structured report
pub fn report_prompt(fields: &str, text: &str) -> String {
    format!(
        "다음 텍스트를 지정된 보고서 양식에 맞게 변환해주세요.\n\
         보고서에는 다음 필드가 포함되어야 합니다:\n\n\
         {}\n\n\
         입력 텍스트:\n\
         {}\n\n\
         JSON 형식으로 결과를 반환해주세요.",
        fields, text
    )
}

/// Length directive fragment; unrecognized lengths use the medium fragment
pub fn length_directive(length: &str) -> &'static str {
    match length {
        "short" => "100단어 이내로",
        "medium" => "200-300단어 정도로",
        "long" => "500단어 정도로",
        _ => "200-300단어 정도로",
    }
}

/// Focus directive fragment; unrecognized focuses use the general fragment
pub fn focus_directive(focus: &str) -> &'static str {
    match focus {
        "general" => "주요 내용을 균형있게 요약해주세요.",
        "key_points" => "가장 중요한 핵심 포인트만 추출하여 요약해주세요.",
        "action_items" => "필요한 조치사항과 결정사항을 중심으로 요약해주세요.",
        _ => "주요 내용을 균형있게 요약해주세요.",
    }
}

/// Language directive fragment; unrecognized languages fall back to Korean
pub fn language_directive(language: &str) -> &'static str {
    match language {
        "ko" => "한국어로 요약해주세요.",
        "en" => "영어로 요약해주세요.",
        "ja" => "일본어로 요약해주세요.",
        _ => "한국어로 요약해주세요.",
    }
}

/// Prompt for summarizing text, assembled from the three directive fragments
pub fn summary_prompt(text: &str, length: &str, focus: &str, language: &str) -> String {
    format!(
        "다음 텍스트를 {} 요약해주세요.\n\
         {}\n\
         {}\n\n\
         원본 텍스트:\n\
         {}",
        length_directive(length),
        focus_directive(focus),
        language_directive(language),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_prompt_embeds_fields_and_text() {
        let prompt = report_prompt("{\"title\": {}}", "회의 내용");
        assert!(prompt.contains("{\"title\": {}}"));
        assert!(prompt.contains("회의 내용"));
        assert!(prompt.contains("JSON 형식"));
    }

    #[test]
    fn test_length_directive_fallback() {
        assert_eq!(length_directive("short"), "100단어 이내로");
        assert_eq!(length_directive("verbose"), length_directive("medium"));
    }

    #[test]
    fn test_focus_directive_fallback() {
        assert_eq!(focus_directive("unknown"), focus_directive("general"));
        assert_ne!(focus_directive("key_points"), focus_directive("general"));
    }

    #[test]
    fn test_language_directive_fallback() {
        assert_eq!(language_directive("en"), "영어로 요약해주세요.");
        // Anything outside the recognized set uses the Korean fragment
        assert_eq!(language_directive("fr"), language_directive("ko"));
    }

    #[test]
    fn test_summary_prompt_uses_all_directives() {
        let prompt = summary_prompt("원본", "short", "action_items", "ja");
        assert!(prompt.contains(length_directive("short")));
        assert!(prompt.contains(focus_directive("action_items")));
        assert!(prompt.contains(language_directive("ja")));
        assert!(prompt.contains("원본"));
    }
}
