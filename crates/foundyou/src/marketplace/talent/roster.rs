use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Availability, SkillSet, TalentId, TalentProfile, TalentRecord, MAX_RATING};
use super::fixtures;

/// Read-only set of listed talent plus any detailed profiles.
#[derive(Debug, Clone, Default)]
pub struct TalentRoster {
    records: Vec<TalentRecord>,
    profiles: BTreeMap<TalentId, TalentProfile>,
}

impl TalentRoster {
    /// The built-in fixture roster.
    pub fn builtin() -> Self {
        let records = fixtures::talent_records();
        let mut profiles = BTreeMap::new();
        if let Some(featured) = records.first().cloned() {
            profiles.insert(featured.id.clone(), fixtures::featured_profile(featured));
        }
        Self { records, profiles }
    }

    pub fn from_records(records: Vec<TalentRecord>) -> Self {
        Self {
            records,
            profiles: BTreeMap::new(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            // Header is line 1.
            let line = index + 2;
            let record = row?.into_record(line)?;
            if !seen.insert(record.id.clone()) {
                return Err(RosterImportError::InvalidRow {
                    line,
                    reason: format!("duplicate talent id '{}'", record.id),
                });
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(RosterImportError::Empty);
        }

        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[TalentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, id: &TalentId) -> Option<&TalentRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Detailed profile when one exists, otherwise a bare profile built from the listing record.
    pub fn profile(&self, id: &TalentId) -> Option<TalentProfile> {
        if let Some(profile) = self.profiles.get(id) {
            return Some(profile.clone());
        }
        self.record(id).cloned().map(TalentProfile::from_record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read talent roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse talent roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("talent roster line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("talent roster contains no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    title: String,
    #[serde(default)]
    avatar: String,
    rating: f32,
    hourly_rate: u32,
    #[serde(deserialize_with = "semicolon_list")]
    skills: Vec<String>,
    #[serde(default)]
    match_score: u8,
    availability: String,
    #[serde(deserialize_with = "flexible_bool")]
    verified: bool,
}

impl RosterRow {
    fn into_record(self, line: usize) -> Result<TalentRecord, RosterImportError> {
        let invalid = |reason: String| RosterImportError::InvalidRow { line, reason };

        if self.id.is_empty() {
            return Err(invalid("id is empty".to_string()));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(invalid(format!(
                "rating {} is outside 0.0-5.0",
                self.rating
            )));
        }
        if self.hourly_rate == 0 {
            return Err(invalid("hourly_rate must be positive".to_string()));
        }
        if self.match_score > 100 {
            return Err(invalid(format!(
                "match_score {} is above 100",
                self.match_score
            )));
        }
        let availability = Availability::from_label(&self.availability)
            .ok_or_else(|| invalid(format!("unknown availability '{}'", self.availability)))?;
        let skills = SkillSet::try_from_unique(&self.skills)
            .map_err(|skill| invalid(format!("duplicate skill '{skill}'")))?;

        Ok(TalentRecord {
            id: TalentId(self.id),
            name: self.name,
            title: self.title,
            avatar: self.avatar,
            rating: self.rating,
            hourly_rate: self.hourly_rate,
            skills,
            match_score: self.match_score,
            availability,
            verified: self.verified,
        })
    }
}

fn semicolon_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect())
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, found '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str =
        "id,name,title,avatar,rating,hourly_rate,skills,match_score,availability,verified\n";

    fn parse(rows: &str) -> Result<TalentRoster, RosterImportError> {
        TalentRoster::from_reader(Cursor::new(format!("{HEADER}{rows}")))
    }

    #[test]
    fn builtin_roster_lists_nine_engineers_with_featured_detail() {
        let roster = TalentRoster::builtin();
        assert_eq!(roster.len(), 9);

        let featured = roster
            .profile(&TalentId::new("1"))
            .expect("featured profile present");
        assert_eq!(featured.location, "San Francisco, CA");
        assert_eq!(featured.record.skills.len(), 11);
        assert_eq!(featured.reviews.len(), 3);

        let plain = roster.profile(&TalentId::new("4")).expect("record present");
        assert_eq!(plain.record.name, "Priya Sharma");
        assert!(plain.work_history.is_empty());

        assert!(roster.profile(&TalentId::new("42")).is_none());
    }

    #[test]
    fn builtin_records_respect_invariants() {
        for record in TalentRoster::builtin().records() {
            assert!((0.0..=5.0).contains(&record.rating), "{}", record.name);
            assert!(record.hourly_rate > 0);
            assert!(record.match_score <= 100);
            assert_eq!(record.skills.len(), 5);
        }
    }

    #[test]
    fn imports_rows_with_semicolon_skills() {
        let roster = parse(
            "10,Ana Lima,Data Engineer,,4.4,70,Python; Spark ;SQL,81,Within 2 weeks,yes\n",
        )
        .expect("roster parses");

        let record = &roster.records()[0];
        assert_eq!(record.id, TalentId::new("10"));
        assert_eq!(record.skills.iter().collect::<Vec<_>>(), ["Python", "Spark", "SQL"]);
        assert_eq!(record.availability, Availability::WithinTwoWeeks);
        assert!(record.verified);
    }

    #[test]
    fn rejects_rows_that_break_record_invariants() {
        let err = parse("10,Ana,Dev,,5.5,70,Go,80,Immediate,true\n").expect_err("rating too high");
        assert!(matches!(err, RosterImportError::InvalidRow { line: 2, .. }));

        let err = parse("10,Ana,Dev,,4.0,70,Go;go,80,Immediate,true\n")
            .expect_err("duplicate skill");
        assert!(err.to_string().contains("duplicate skill"));

        let err = parse("10,Ana,Dev,,4.0,70,Go,80,Someday,true\n").expect_err("availability");
        assert!(err.to_string().contains("Someday"));

        let err = parse(
            "10,Ana,Dev,,4.0,70,Go,80,Immediate,true\n10,Bo,Dev,,4.0,70,Go,80,Immediate,true\n",
        )
        .expect_err("duplicate id");
        assert!(matches!(err, RosterImportError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn empty_roster_is_an_error() {
        assert!(matches!(parse(""), Err(RosterImportError::Empty)));
    }
}
