//! Page state for the tour analyzer, kept free of DOM calls so the flow
//! can be exercised off the browser.

use tourlens_common::{validate_tour_url, AnalysisResult, TourUrlError};

/// Placeholder for headline slots while a request is in flight.
pub const LOADING_TEXT: &str = "...";
/// Pause before results are written, so the reveal transition can play.
pub const RESULT_DELAY_MS: u32 = 500;
pub const COPY_FEEDBACK_MS: u32 = 2000;

pub const COPY_FAILED_MESSAGE: &str = "Failed to copy content. Please select and copy manually.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    EngagementScore,
    EngagementInsight,
    TopSpace,
    SpaceInsight,
    AvgDuration,
    DurationInsight,
    MarketingAngle,
    AngleInsight,
    GeneratedCopy,
}

impl Slot {
    pub const ALL: [Slot; 9] = [
        Slot::EngagementScore,
        Slot::EngagementInsight,
        Slot::TopSpace,
        Slot::SpaceInsight,
        Slot::AvgDuration,
        Slot::DurationInsight,
        Slot::MarketingAngle,
        Slot::AngleInsight,
        Slot::GeneratedCopy,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Slot::EngagementScore => "engagementScore",
            Slot::EngagementInsight => "engagementInsight",
            Slot::TopSpace => "topSpace",
            Slot::SpaceInsight => "spaceInsight",
            Slot::AvgDuration => "avgDuration",
            Slot::DurationInsight => "durationInsight",
            Slot::MarketingAngle => "marketingAngle",
            Slot::AngleInsight => "angleInsight",
            Slot::GeneratedCopy => "generatedCopy",
        }
    }

    fn value(self, result: &AnalysisResult) -> &str {
        match self {
            Slot::EngagementScore => &result.engagement_score,
            Slot::EngagementInsight => &result.engagement_insight,
            Slot::TopSpace => &result.top_space,
            Slot::SpaceInsight => &result.space_insight,
            Slot::AvgDuration => &result.avg_duration,
            Slot::DurationInsight => &result.duration_insight,
            Slot::MarketingAngle => &result.marketing_angle,
            Slot::AngleInsight => &result.angle_insight,
            Slot::GeneratedCopy => &result.marketing_copy,
        }
    }

    fn is_headline(self) -> bool {
        matches!(
            self,
            Slot::EngagementScore | Slot::TopSpace | Slot::AvgDuration | Slot::MarketingAngle
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    Text(String),
    /// Animated placeholder block, rendered as markup.
    Shimmer,
}

pub fn loading_slots() -> Vec<(Slot, SlotContent)> {
    Slot::ALL
        .iter()
        .map(|&slot| {
            let content = match slot {
                Slot::GeneratedCopy => SlotContent::Shimmer,
                s if s.is_headline() => SlotContent::Text(LOADING_TEXT.to_string()),
                _ => SlotContent::Text(String::new()),
            };
            (slot, content)
        })
        .collect()
}

pub fn result_slots(result: &AnalysisResult) -> Vec<(Slot, SlotContent)> {
    Slot::ALL
        .iter()
        .map(|&slot| (slot, SlotContent::Text(slot.value(result).to_string())))
        .collect()
}

pub fn alert_message(err: TourUrlError) -> &'static str {
    match err {
        TourUrlError::Missing => "Please enter a 3D tour URL",
        TourUrlError::Unsupported => {
            "Please enter a valid Matterport, Zillow 3D Home, or iGUIDE URL"
        }
    }
}

/// Text worth copying from the marketing-copy slot, or `None` while it
/// still holds a placeholder.
pub fn copyable(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() || text == LOADING_TEXT || text.contains("loading") {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Populated,
}

/// Owns the analyzer's phase for one page session.
///
/// A new submission is accepted even while one is loading; nothing is
/// cancelled and whichever response resolves last is what ends up shown.
#[derive(Debug)]
pub struct Controller {
    phase: Phase,
    in_flight: usize,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            in_flight: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Trims and checks the raw input. On success the controller moves to
    /// `Loading` and the trimmed URL is returned for the request; a
    /// rejected input puts it back to `Idle`.
    pub fn submit(&mut self, raw: &str) -> Result<String, TourUrlError> {
        let url = raw.trim();
        if let Err(e) = validate_tour_url(url) {
            self.phase = Phase::Idle;
            return Err(e);
        }
        self.phase = Phase::Loading;
        self.in_flight += 1;
        Ok(url.to_string())
    }

    /// Settles one request. Any error is replaced by the fallback record,
    /// so the caller always gets something to render.
    pub fn resolve<E>(&mut self, outcome: Result<AnalysisResult, E>) -> AnalysisResult {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.phase = Phase::Populated;
        outcome.unwrap_or_else(|_| AnalysisResult::fallback())
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
