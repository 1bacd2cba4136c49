use tourlens_common::{validate_tour_url, AnalysisResult};

use crate::error::AnalyzeError;
use crate::prompt::build_analysis_prompt;
use crate::provider::CompletionProvider;

/// Removes a surrounding markdown code fence (```` ```json ```` or bare
/// ```` ``` ````) and the whitespace around it.
pub fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parses the model's reply into a checked [`AnalysisResult`].
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalyzeError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!(error = %e, raw = %cleaned, "model reply is not a valid analysis");
        AnalyzeError::format(e)
    })
}

/// Validates the URL, asks the provider for an analysis and checks the
/// reply. A rejected URL never reaches the provider.
pub async fn analyze_tour(
    provider: &dyn CompletionProvider,
    url: &str,
) -> Result<AnalysisResult, AnalyzeError> {
    validate_tour_url(url)?;

    let prompt = build_analysis_prompt(url);
    let reply = provider.complete(&prompt).await?;
    parse_analysis(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
  "engagementScore": "85",
  "engagementInsight": "Above average - indicates strong property appeal",
  "topSpace": "Kitchen",
  "spaceInsight": "Modern kitchens drive 40% higher engagement",
  "avgDuration": "4:23",
  "durationInsight": "Extended viewing suggests serious buyer interest",
  "marketingAngle": "Lifestyle & Entertaining",
  "angleInsight": "Focus on social spaces and flow",
  "marketingCopy": "Sunlit rooms. Easy flow. Great kitchen."
}"#;

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{BODY}\n```");
        assert_eq!(strip_code_fences(&fenced), BODY);
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        let fenced = format!("\n  ```\n{BODY}\n```  \n");
        assert_eq!(strip_code_fences(&fenced), BODY);
    }

    #[test]
    fn unfenced_text_is_untouched() {
        assert_eq!(strip_code_fences(BODY), BODY);
    }

    #[test]
    fn parses_fenced_reply() {
        let fenced = format!("```json\n{BODY}\n```");
        let direct: AnalysisResult = serde_json::from_str(BODY).unwrap();
        assert_eq!(parse_analysis(&fenced).unwrap(), direct);
        assert_eq!(direct.avg_duration, "4:23");
    }

    #[test]
    fn prose_is_a_format_error() {
        let err = parse_analysis("Sorry, I can't analyze that tour.").unwrap_err();
        assert!(matches!(err, AnalyzeError::Format(_)));
    }

    #[test]
    fn wrong_shape_is_a_format_error() {
        let err = parse_analysis(r#"{"engagementScore": 85}"#).unwrap_err();
        assert!(matches!(err, AnalyzeError::Format(_)));
    }
}
