use serde::{Deserialize, Serialize};

/// The nine-field engagement analysis rendered by the page.
///
/// Every field is a string, numbers included. Deserializing rejects a
/// record with a missing or non-string field, which is how a malformed
/// model reply is caught before it reaches the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub engagement_score: String,
    pub engagement_insight: String,
    pub top_space: String,
    pub space_insight: String,
    pub avg_duration: String,
    pub duration_insight: String,
    pub marketing_angle: String,
    pub angle_insight: String,
    pub marketing_copy: String,
}

impl AnalysisResult {
    /// Demo record shown whenever the live analysis fails.
    pub fn fallback() -> Self {
        Self {
            engagement_score: "78".to_string(),
            engagement_insight: "Strong engagement - property shows well digitally".to_string(),
            top_space: "Kitchen".to_string(),
            space_insight: "Buyers spend 38% of tour time here".to_string(),
            avg_duration: "3:47".to_string(),
            duration_insight: "Above industry average of 2:15".to_string(),
            marketing_angle: "Modern Lifestyle".to_string(),
            angle_insight: "Emphasize updated features and flow".to_string(),
            marketing_copy: "This property commands attention from the moment buyers step into the virtual tour. The chef's kitchen anchors an open floor plan that flows seamlessly into generous living spaces. With buyers spending nearly 4 minutes exploring, the data shows this home creates the mental ownership that drives offers. Updated throughout with attention to modern living preferences.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_camel_case_keys() {
        let value = serde_json::to_value(AnalysisResult::fallback()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        for key in [
            "engagementScore",
            "engagementInsight",
            "topSpace",
            "spaceInsight",
            "avgDuration",
            "durationInsight",
            "marketingAngle",
            "angleInsight",
            "marketingCopy",
        ] {
            assert!(obj[key].is_string(), "{key}");
        }
        assert_eq!(obj["engagementScore"], "78");
    }

    #[test]
    fn numeric_score_is_rejected() {
        let mut value = serde_json::to_value(AnalysisResult::fallback()).unwrap();
        value["engagementScore"] = json!(85);
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut value = serde_json::to_value(AnalysisResult::fallback()).unwrap();
        value.as_object_mut().unwrap().remove("marketingCopy");
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let mut value = serde_json::to_value(AnalysisResult::fallback()).unwrap();
        value["confidence"] = json!("high");
        let parsed: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, AnalysisResult::fallback());
    }
}
