use serde::{Deserialize, Deserializer, Serialize};

use crate::marketplace::talent::{Availability, SkillSet, TalentRecord};

/// Skills a searcher can pick from.
pub const SKILL_VOCABULARY: [&str; 43] = [
    "JavaScript",
    "TypeScript",
    "React",
    "Next.js",
    "Node.js",
    "Python",
    "Django",
    "Flask",
    "Ruby",
    "Rails",
    "Go",
    "Rust",
    "Java",
    "Spring",
    "C#",
    ".NET",
    "PHP",
    "Laravel",
    "Vue.js",
    "Angular",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "GraphQL",
    "REST API",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Firebase",
    "Supabase",
    "TensorFlow",
    "PyTorch",
    "Machine Learning",
    "AI",
    "DevOps",
    "Mobile Development",
    "Android",
    "iOS",
    "React Native",
    "Flutter",
];

/// Vocabulary spelling of a skill, matched case-insensitively.
pub fn canonical_skill(raw: &str) -> Option<&'static str> {
    let needle = raw.trim();
    SKILL_VOCABULARY
        .iter()
        .copied()
        .find(|skill| skill.eq_ignore_ascii_case(needle))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("hourly rate bounds must lie within {min}-{max} (found {low}-{high})", min = RateRange::MIN, max = RateRange::MAX)]
    RateOutOfBounds { low: u32, high: u32 },
    #[error("hourly rate lower bound {low} exceeds upper bound {high}")]
    RateInverted { low: u32, high: u32 },
}

/// Hourly rate slider selection. `low <= high` and both stay within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct RateRange {
    low: u32,
    high: u32,
}

impl RateRange {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 300;
    pub const STEP: u32 = 5;
    pub const DEFAULT_LOW: u32 = 30;
    pub const DEFAULT_HIGH: u32 = 150;

    /// Checked range from raw bounds, each snapped to the nearest slider step.
    pub fn new(low: u32, high: u32) -> Result<Self, CriteriaError> {
        if low < Self::MIN || high > Self::MAX {
            return Err(CriteriaError::RateOutOfBounds { low, high });
        }
        if low > high {
            return Err(CriteriaError::RateInverted { low, high });
        }
        Ok(Self {
            low: snap(low),
            high: snap(high),
        })
    }

    pub fn full() -> Self {
        Self {
            low: Self::MIN,
            high: Self::MAX,
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Move the lower thumb. It stops at the upper thumb.
    pub fn set_low(&mut self, value: u32) {
        self.low = snap(value).min(self.high);
    }

    /// Move the upper thumb. It stops at the lower thumb.
    pub fn set_high(&mut self, value: u32) {
        self.high = snap(value).max(self.low);
    }

    /// Set both thumbs at once, in either order.
    pub fn set(&mut self, first: u32, second: u32) {
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        self.low = snap(low);
        self.high = snap(high);
    }

    pub fn contains(&self, rate: u32) -> bool {
        (self.low..=self.high).contains(&rate)
    }
}

impl Default for RateRange {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

impl TryFrom<[u32; 2]> for RateRange {
    type Error = CriteriaError;

    fn try_from([low, high]: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<RateRange> for [u32; 2] {
    fn from(range: RateRange) -> Self {
        [range.low, range.high]
    }
}

fn snap(value: u32) -> u32 {
    let clamped = value.clamp(RateRange::MIN, RateRange::MAX);
    let steps = (clamped - RateRange::MIN + RateRange::STEP / 2) / RateRange::STEP;
    (RateRange::MIN + steps * RateRange::STEP).min(RateRange::MAX)
}

/// Snapshot of the search form handed to the listing on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub rate_range: RateRange,
    /// `None` means any availability.
    #[serde(default, deserialize_with = "any_availability")]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub verified_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            skills: SkillSet::new(),
            rate_range: RateRange::default(),
            availability: None,
            verified_only: false,
        }
    }
}

impl FilterCriteria {
    /// Check criteria that did not come from the closed form controls.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        match self
            .skills
            .iter()
            .find(|skill| canonical_skill(skill).is_none())
        {
            Some(unknown) => Err(CriteriaError::UnknownSkill(unknown.to_string())),
            None => Ok(()),
        }
    }

    /// Whether a record satisfies every active criterion.
    ///
    /// The query is a case-insensitive substring of the name, title, or any skill; every
    /// selected skill must be present; rate bounds are inclusive.
    pub fn matches(&self, record: &TalentRecord) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_matches = query.is_empty()
            || record.name.to_lowercase().contains(&query)
            || record.title.to_lowercase().contains(&query)
            || record
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&query));

        query_matches
            && self.skills.iter().all(|skill| record.skills.contains(skill))
            && self.rate_range.contains(record.hourly_rate)
            && self
                .availability
                .map_or(true, |wanted| wanted == record.availability)
            && (!self.verified_only || record.verified)
    }
}

fn any_availability<'de, D>(deserializer: D) -> Result<Option<Availability>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("any") => Ok(None),
        Some(value) => Availability::from_label(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown availability '{value}'"))),
    }
}

/// In-memory state of the search form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    query: String,
    skills: SkillSet,
    rate_range: RateRange,
    availability: Option<Availability>,
    verified_only: bool,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select a vocabulary skill. Unknown or already selected skills are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        match canonical_skill(skill) {
            Some(canonical) => self.skills.insert(canonical),
            None => false,
        }
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill)
    }

    /// Vocabulary skills not yet selected, in vocabulary order.
    pub fn available_skills(&self) -> Vec<&'static str> {
        SKILL_VOCABULARY
            .iter()
            .copied()
            .filter(|skill| !self.skills.contains(skill))
            .collect()
    }

    pub fn set_rate_low(&mut self, value: u32) {
        self.rate_range.set_low(value);
    }

    pub fn set_rate_high(&mut self, value: u32) {
        self.rate_range.set_high(value);
    }

    pub fn set_rate_range(&mut self, first: u32, second: u32) {
        self.rate_range.set(first, second);
    }

    pub fn set_availability(&mut self, availability: Option<Availability>) {
        self.availability = availability;
    }

    pub fn set_verified_only(&mut self, verified_only: bool) {
        self.verified_only = verified_only;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn rate_range(&self) -> RateRange {
        self.rate_range
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Snapshot the current state.
    pub fn submit(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.query.clone(),
            skills: self.skills.clone(),
            rate_range: self.rate_range,
            availability: self.availability,
            verified_only: self.verified_only,
        }
    }
}
