//! Site map and static page content.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::marketplace::search::{RateRange, SKILL_VOCABULARY};
use crate::marketplace::talent::Availability;

/// Pages the API can direct a client to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteRoute {
    Home,
    Search,
    /// `/profile/:id`; `me` is the signed-in engineer's own profile.
    Profile(String),
    Login,
    Signup,
    Onboarding,
    Dashboard,
}

impl SiteRoute {
    pub const OWN_PROFILE: &'static str = "me";

    pub fn own_profile() -> Self {
        SiteRoute::Profile(Self::OWN_PROFILE.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            SiteRoute::Home => "/".to_string(),
            SiteRoute::Search => "/search".to_string(),
            SiteRoute::Profile(id) => format!("/profile/{id}"),
            SiteRoute::Login => "/login".to_string(),
            SiteRoute::Signup => "/signup".to_string(),
            SiteRoute::Onboarding => "/onboarding".to_string(),
            SiteRoute::Dashboard => "/dashboard".to_string(),
        }
    }

    /// Parse a path, ignoring a trailing slash and any query string.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(SiteRoute::Home),
            "/search" => Some(SiteRoute::Search),
            "/login" => Some(SiteRoute::Login),
            "/signup" => Some(SiteRoute::Signup),
            "/onboarding" => Some(SiteRoute::Onboarding),
            "/dashboard" => Some(SiteRoute::Dashboard),
            other => {
                let id = other.strip_prefix("/profile/")?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(SiteRoute::Profile(id.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for SiteRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for SiteRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: SiteRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "AI-Powered Matching",
        description: "Our advanced algorithms match you with engineers who have the exact skills your project requires.",
    },
    Feature {
        title: "Smart Search",
        description: "Find engineers by skills, experience, availability, and pricing with our intelligent search system.",
    },
    Feature {
        title: "Project Management",
        description: "Manage your projects from start to finish with our comprehensive project management tools.",
    },
    Feature {
        title: "Real-Time Chat",
        description: "Communicate with engineers directly through our secure real-time messaging platform.",
    },
    Feature {
        title: "Secure Payments",
        description: "Process payments securely using our integrated payment system with escrow protection.",
    },
    Feature {
        title: "Verified Profiles",
        description: "All engineer profiles are thoroughly vetted and verified for quality assurance.",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct HomeContent {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub calls_to_action: Vec<CallToAction>,
    pub features: &'static [Feature],
}

impl HomeContent {
    pub fn standard() -> Self {
        Self {
            headline: "Find the perfect engineer for your next project",
            tagline: "FoundYou leverages AI to connect you with the most qualified engineers based on your project requirements, timeline, and budget.",
            calls_to_action: vec![
                CallToAction {
                    label: "Find Engineers",
                    target: SiteRoute::Search,
                },
                CallToAction {
                    label: "Create Account",
                    target: SiteRoute::Signup,
                },
            ],
            features: &FEATURES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateSlider {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: [u32; 2],
}

/// Controls offered by the search filter panel.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOptions {
    pub skills: &'static [&'static str],
    pub availability: Vec<&'static str>,
    pub rate: RateSlider,
}

impl SearchOptions {
    pub fn catalog() -> Self {
        Self {
            skills: &SKILL_VOCABULARY,
            availability: Availability::ALL.into_iter().map(Availability::label).collect(),
            rate: RateSlider {
                min: RateRange::MIN,
                max: RateRange::MAX,
                step: RateRange::STEP,
                default: [RateRange::DEFAULT_LOW, RateRange::DEFAULT_HIGH],
            },
        }
    }
}
