use tourlens_common::TourPlatform;

/// Builds the single instruction sent to the model for a tour URL.
///
/// The URL is embedded exactly as received.
pub fn build_analysis_prompt(url: &str) -> String {
    let platform = TourPlatform::detect(url).display_name();

    format!(
        r#"You are an AI analyzing 3D property tours to provide marketing intelligence.

CRITICAL: Generate UNIQUE and VARIED analysis for each URL. Never repeat the same numbers or descriptions.

Given this 3D tour URL: {url}

Platform: {platform}

Generate analysis with RANDOMIZED values:
1. Engagement score between 62-94 (vary widely)
2. Different top converting spaces each time (kitchen, master bedroom, living room, outdoor space, bathroom, entryway, dining room, basement, office, etc.)
3. Tour duration between 2:15 and 6:30 (vary significantly)
4. Unique marketing angles (Modern Lifestyle, Family Living, Entertainer's Dream, Urban Luxury, Cozy Retreat, Investment Opportunity, etc.)
5. Completely original 3-4 sentence property description

Make each response feel authentic and different. Use the URL itself to inform variations.

Return ONLY valid JSON with no markdown. Every value must be a string:
{{
  "engagementScore": "XX",
  "engagementInsight": "unique insight here",
  "topSpace": "specific room",
  "spaceInsight": "why this space matters",
  "avgDuration": "X:XX",
  "durationInsight": "what this duration means",
  "marketingAngle": "unique angle",
  "angleInsight": "brief explanation",
  "marketingCopy": "Original compelling 3-4 sentence description"
}}"#,
        url = url,
        platform = platform,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_url_verbatim() {
        let url = "https://my.matterport.com/show/?m=abc123&play=1 ";
        let prompt = build_analysis_prompt(url);
        assert!(prompt.contains(&format!("Given this 3D tour URL: {url}\n")));
    }

    #[test]
    fn names_platform() {
        assert!(build_analysis_prompt("https://www.zillow.com/view-imx/9")
            .contains("Platform: Zillow 3D Home"));
        assert!(build_analysis_prompt("https://youriguide.com/x").contains("Platform: iGUIDE"));
    }

    #[test]
    fn lists_every_result_field() {
        let prompt = build_analysis_prompt("https://my.matterport.com/show/?m=1");
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
            assert!(prompt.contains(&format!("\"{key}\"")), "{key}");
        }
    }
}
