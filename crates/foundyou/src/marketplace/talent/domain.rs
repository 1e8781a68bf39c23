use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for talent listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalentId(pub String);

impl TalentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TalentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How soon a listed engineer can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Immediate")]
    Immediate,
    #[serde(rename = "Within 1 week")]
    WithinOneWeek,
    #[serde(rename = "Within 2 weeks")]
    WithinTwoWeeks,
    #[serde(rename = "Within a month")]
    WithinAMonth,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::Immediate,
        Availability::WithinOneWeek,
        Availability::WithinTwoWeeks,
        Availability::WithinAMonth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Availability::Immediate => "Immediate",
            Availability::WithinOneWeek => "Within 1 week",
            Availability::WithinTwoWeeks => "Within 2 weeks",
            Availability::WithinAMonth => "Within a month",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(needle))
    }
}

/// Ordered skill list that never holds the same skill twice.
///
/// Comparison is case-insensitive so "react" and "React" are one skill; the first spelling wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the skill is blank or already present.
    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        let skill = skill.as_ref().trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.0.push(skill.to_string());
        true
    }

    /// Returns `false` when the skill was not selected.
    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.0.len();
        self.0
            .retain(|existing| !existing.eq_ignore_ascii_case(skill.trim()));
        self.0.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(skill.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Build a set from a list that must already be free of duplicates.
    pub fn try_from_unique<I, S>(skills: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for skill in skills {
            let skill = skill.as_ref();
            if skill.trim().is_empty() {
                continue;
            }
            if !set.insert(skill) {
                return Err(skill.trim().to_string());
            }
        }
        Ok(set)
    }

    /// Split a comma separated field, dropping blanks and repeats.
    pub fn from_comma_list(raw: &str) -> Self {
        raw.split(',').collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        SkillSet::try_from_unique(raw)
            .map_err(|skill| serde::de::Error::custom(format!("duplicate skill '{skill}'")))
    }
}

/// One star of a five star rating strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Star {
    Full,
    Half,
    Empty,
}

pub const MAX_RATING: f32 = 5.0;

/// Five stars for a rating; out-of-domain ratings are clamped to 0.0..=5.0.
pub fn star_strip(rating: f32) -> [Star; 5] {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, MAX_RATING)
    } else {
        0.0
    };
    let whole = rating.floor();
    let mut stars = [Star::Empty; 5];
    for (index, star) in stars.iter_mut().enumerate() {
        let position = index as f32;
        *star = if position < whole {
            Star::Full
        } else if position < rating {
            Star::Half
        } else {
            Star::Empty
        };
    }
    stars
}

/// Listing entry shown in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentRecord {
    pub id: TalentId,
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub rating: f32,
    pub hourly_rate: u32,
    pub skills: SkillSet,
    /// Static display value; nothing computes it.
    pub match_score: u8,
    pub availability: Availability,
    pub verified: bool,
}

impl TalentRecord {
    pub fn stars(&self) -> [Star; 5] {
        star_strip(self.rating)
    }

    pub fn profile_path(&self) -> String {
        format!("/profile/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientReview {
    pub name: String,
    pub rating: f32,
    pub comment: String,
    pub date: NaiveDate,
}

/// Everything the profile page shows for one engineer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentProfile {
    #[serde(flatten)]
    pub record: TalentRecord,
    pub bio: String,
    pub location: String,
    pub experience_years: u8,
    pub languages: Vec<SpokenLanguage>,
    pub education: Vec<Education>,
    pub work_history: Vec<WorkHistoryEntry>,
    pub projects: Vec<PortfolioProject>,
    pub reviews: Vec<ClientReview>,
}

impl TalentProfile {
    /// Profile with no detail beyond the listing record.
    pub fn from_record(record: TalentRecord) -> Self {
        Self {
            record,
            bio: String::new(),
            location: String::new(),
            experience_years: 0,
            languages: Vec::new(),
            education: Vec::new(),
            work_history: Vec::new(),
            projects: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn average_review_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f32 = self.reviews.iter().map(|review| review.rating).sum();
        Some(total / self.reviews.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_strip_matches_half_star_rounding() {
        assert_eq!(
            star_strip(4.5),
            [Star::Full, Star::Full, Star::Full, Star::Full, Star::Half]
        );
        assert_eq!(
            star_strip(4.0),
            [Star::Full, Star::Full, Star::Full, Star::Full, Star::Empty]
        );
        assert_eq!(star_strip(0.0), [Star::Empty; 5]);
    }

    #[test]
    fn star_strip_never_leaves_the_rating_domain() {
        assert_eq!(star_strip(11.0), [Star::Full; 5]);
        assert_eq!(star_strip(-3.0), [Star::Empty; 5]);
        assert_eq!(star_strip(f32::NAN), [Star::Empty; 5]);
    }

    #[test]
    fn skill_set_add_and_remove_are_idempotent() {
        let mut skills = SkillSet::new();
        assert!(skills.insert("React"));
        assert!(!skills.insert("React"));
        assert!(!skills.insert("react"));
        assert_eq!(skills.len(), 1);

        assert!(!skills.remove("Node.js"));
        assert_eq!(skills.len(), 1);
        assert!(skills.remove("React"));
        assert!(!skills.remove("React"));
        assert!(skills.is_empty());
    }

    #[test]
    fn comma_list_drops_blanks_and_repeats() {
        let skills = SkillSet::from_comma_list("React, Node.js,, react ,AWS");
        assert_eq!(skills.iter().collect::<Vec<_>>(), ["React", "Node.js", "AWS"]);
    }

    #[test]
    fn deserializing_duplicate_skills_fails() {
        let result: Result<SkillSet, _> = serde_json::from_str(r#"["Go", "Rust", "Go"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn availability_labels_round_trip() {
        for availability in Availability::ALL {
            assert_eq!(Availability::from_label(availability.label()), Some(availability));
        }
        assert_eq!(
            Availability::from_label("within 2 WEEKS"),
            Some(Availability::WithinTwoWeeks)
        );
        assert_eq!(Availability::from_label("someday"), None);
    }
}
