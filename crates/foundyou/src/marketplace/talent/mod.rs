//! Talent listings: the record model, the built-in fixture roster, and CSV roster import.

pub mod domain;
mod fixtures;
pub mod roster;

pub use domain::{
    star_strip, Availability, ClientReview, Education, PortfolioProject, SkillSet,
    SpokenLanguage, Star, TalentId, TalentProfile, TalentRecord, WorkHistoryEntry,
};
pub use roster::{RosterImportError, TalentRoster};
