use serde::Serialize;

use super::source::ListingPage;
use crate::marketplace::talent::{Availability, Star, TalentId, TalentProfile, TalentRecord};

/// Skills shown on a card before the "+N more" overflow.
pub const CARD_SKILL_PREVIEW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalentCardView {
    pub id: TalentId,
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub rating: f32,
    pub rating_label: String,
    pub stars: [Star; 5],
    pub hourly_rate: u32,
    pub rate_label: String,
    pub availability: Availability,
    pub verified: bool,
    pub top_skills: Vec<String>,
    pub more_skills: Vec<String>,
    pub match_score: u8,
    /// First card of a listing carries the "Top Match" badge.
    pub featured: bool,
    pub profile_path: String,
}

impl TalentCardView {
    pub fn from_record(record: &TalentRecord, featured: bool) -> Self {
        let (top_skills, more_skills) = split_skills(record);
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            avatar: record.avatar.clone(),
            rating: record.rating,
            rating_label: format!("{:.1}", record.rating),
            stars: record.stars(),
            hourly_rate: record.hourly_rate,
            rate_label: format!("${}/hr", record.hourly_rate),
            availability: record.availability,
            verified: record.verified,
            top_skills,
            more_skills,
            match_score: record.match_score,
            featured,
            profile_path: record.profile_path(),
        }
    }

    /// "+N more" label, when skills overflow the card.
    pub fn overflow_label(&self) -> Option<String> {
        if self.more_skills.is_empty() {
            None
        } else {
            Some(format!("+{} more", self.more_skills.len()))
        }
    }
}

fn split_skills(record: &TalentRecord) -> (Vec<String>, Vec<String>) {
    let skills: Vec<String> = record.skills.iter().map(str::to_string).collect();
    let split = skills.len().min(CARD_SKILL_PREVIEW);
    let (top, more) = skills.split_at(split);
    (top.to_vec(), more.to_vec())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub page: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub total_matches: usize,
    pub records: Vec<TalentCardView>,
}

impl From<ListingPage> for ListingView {
    fn from(page: ListingPage) -> Self {
        let records = cards(&page.records);
        Self {
            page: page.page,
            total_pages: page.total_pages,
            has_previous: page.page > 1,
            has_next: page.page < page.total_pages,
            total_matches: page.total_matches,
            records,
        }
    }
}

pub fn cards(records: &[TalentRecord]) -> Vec<TalentCardView> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| TalentCardView::from_record(record, index == 0))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: TalentProfile,
    pub stars: [Star; 5],
    pub rating_label: String,
    pub rate_label: String,
}

impl From<TalentProfile> for ProfileView {
    fn from(profile: TalentProfile) -> Self {
        Self {
            stars: profile.record.stars(),
            rating_label: format!("{:.1}", profile.record.rating),
            rate_label: format!("${}/hr", profile.record.hourly_rate),
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::talent::TalentRoster;

    #[test]
    fn cards_preview_three_skills_and_feature_the_first() {
        let roster = TalentRoster::builtin();
        let cards = cards(roster.records());

        assert!(cards[0].featured);
        assert!(cards.iter().skip(1).all(|card| !card.featured));

        let first = &cards[0];
        assert_eq!(first.top_skills, ["React", "TypeScript", "Next.js"]);
        assert_eq!(first.overflow_label().as_deref(), Some("+2 more"));
        assert_eq!(first.rate_label, "$85/hr");
        assert_eq!(first.rating_label, "4.9");
        assert_eq!(first.profile_path, "/profile/1");
    }

    #[test]
    fn short_skill_lists_have_no_overflow() {
        let mut record = TalentRoster::builtin().records()[0].clone();
        record.skills = ["Go", "Rust"].into_iter().collect();
        let card = TalentCardView::from_record(&record, false);
        assert_eq!(card.top_skills, ["Go", "Rust"]);
        assert_eq!(card.overflow_label(), None);
    }
}
