use thiserror::Error;

/// Host substrings accepted as supported tour providers.
pub const SUPPORTED_HOSTS: [&str; 3] = ["matterport.com", "zillow.com", "iguide.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TourUrlError {
    #[error("Tour URL is required")]
    Missing,
    #[error("Invalid tour URL")]
    Unsupported,
}

/// Whitelist check shared by the endpoint and the page controller.
///
/// This is a substring match, not URL parsing: anything containing one of
/// [`SUPPORTED_HOSTS`] passes, whatever else it looks like.
pub fn validate_tour_url(url: &str) -> Result<(), TourUrlError> {
    if url.is_empty() {
        return Err(TourUrlError::Missing);
    }
    if SUPPORTED_HOSTS.iter().any(|host| url.contains(host)) {
        Ok(())
    } else {
        Err(TourUrlError::Unsupported)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPlatform {
    Matterport,
    Zillow3dHome,
    IGuide,
}

impl TourPlatform {
    /// Matterport wins over Zillow, anything else is treated as iGUIDE.
    pub fn detect(url: &str) -> Self {
        if url.contains("matterport") {
            TourPlatform::Matterport
        } else if url.contains("zillow") {
            TourPlatform::Zillow3dHome
        } else {
            TourPlatform::IGuide
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TourPlatform::Matterport => "Matterport",
            TourPlatform::Zillow3dHome => "Zillow 3D Home",
            TourPlatform::IGuide => "iGUIDE",
        }
    }
}
