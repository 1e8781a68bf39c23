use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::flow::{FormError, FormFlow, FormState, Notice, Submission, Validate};
use super::validation::{Constraint, FieldErrors, FieldRule, FieldSpec, BIO};
use crate::marketplace::site::SiteRoute;
use crate::marketplace::talent::SkillSet;

/// Account type chosen at signup: `hire` for clients, `work` for engineers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hire,
    #[default]
    Work,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Hire => "hire",
            Role::Work => "work",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hire" | "client" => Some(Role::Hire),
            "work" | "engineer" => Some(Role::Work),
            _ => None,
        }
    }
}

/// Select-box entry: the submitted value and the label shown to people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expertise {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Devops,
    Ai,
    Data,
    Blockchain,
    Design,
}

impl Expertise {
    pub const ALL: [Expertise; 9] = [
        Expertise::Frontend,
        Expertise::Backend,
        Expertise::Fullstack,
        Expertise::Mobile,
        Expertise::Devops,
        Expertise::Ai,
        Expertise::Data,
        Expertise::Blockchain,
        Expertise::Design,
    ];
    const VALUES: [&'static str; 9] = [
        "frontend",
        "backend",
        "fullstack",
        "mobile",
        "devops",
        "ai",
        "data",
        "blockchain",
        "design",
    ];

    pub fn value(self) -> &'static str {
        Self::VALUES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Expertise::Frontend => "Frontend Development",
            Expertise::Backend => "Backend Development",
            Expertise::Fullstack => "Full Stack Development",
            Expertise::Mobile => "Mobile Development",
            Expertise::Devops => "DevOps",
            Expertise::Ai => "AI/Machine Learning",
            Expertise::Data => "Data Science",
            Expertise::Blockchain => "Blockchain",
            Expertise::Design => "UI/UX Design",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];
    const VALUES: [&'static str; 4] = ["entry", "mid", "senior", "lead"];

    pub fn value(self) -> &'static str {
        Self::VALUES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level (0-2 years)",
            ExperienceLevel::Mid => "Mid Level (3-5 years)",
            ExperienceLevel::Senior => "Senior (5-8 years)",
            ExperienceLevel::Lead => "Lead/Architect (8+ years)",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Tech,
    Finance,
    Healthcare,
    Education,
    Ecommerce,
    Media,
    Manufacturing,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Tech,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Education,
        Industry::Ecommerce,
        Industry::Media,
        Industry::Manufacturing,
        Industry::Other,
    ];
    const VALUES: [&'static str; 8] = [
        "tech",
        "finance",
        "healthcare",
        "education",
        "ecommerce",
        "media",
        "manufacturing",
        "other",
    ];

    pub fn value(self) -> &'static str {
        Self::VALUES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Industry::Tech => "Technology",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Education => "Education",
            Industry::Ecommerce => "E-commerce",
            Industry::Media => "Media & Entertainment",
            Industry::Manufacturing => "Manufacturing",
            Industry::Other => "Other",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSize {
    Solo,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl TeamSize {
    pub const ALL: [TeamSize; 5] = [
        TeamSize::Solo,
        TeamSize::Small,
        TeamSize::Medium,
        TeamSize::Large,
        TeamSize::Enterprise,
    ];
    const VALUES: [&'static str; 5] = ["solo", "small", "medium", "large", "enterprise"];

    pub fn value(self) -> &'static str {
        Self::VALUES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamSize::Solo => "Solo Founder",
            TeamSize::Small => "Small (2-10 employees)",
            TeamSize::Medium => "Medium (11-50 employees)",
            TeamSize::Large => "Large (51-200 employees)",
            TeamSize::Enterprise => "Enterprise (201+ employees)",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.value() == raw)
    }
}

const TITLE: FieldSpec = FieldSpec {
    name: "title",
    rules: &[FieldRule::new(
        Constraint::MinChars(2),
        "Title must be at least 2 characters",
    )],
};
const EXPERTISE: FieldSpec = FieldSpec {
    name: "expertise",
    rules: &[FieldRule::new(
        Constraint::OneOf(&Expertise::VALUES),
        "Please select your expertise",
    )],
};
const SKILLS: FieldSpec = FieldSpec {
    name: "skills",
    rules: &[FieldRule::new(
        Constraint::MinChars(3),
        "Please list at least one skill",
    )],
};
const HOURLY_RATE: FieldSpec = FieldSpec {
    name: "hourly_rate",
    rules: &[FieldRule::new(
        Constraint::PositiveNumber,
        "Please enter your hourly rate",
    )],
};
const EXPERIENCE_LEVEL: FieldSpec = FieldSpec {
    name: "experience_level",
    rules: &[FieldRule::new(
        Constraint::OneOf(&ExperienceLevel::VALUES),
        "Please select your experience level",
    )],
};
const COMPANY_NAME: FieldSpec = FieldSpec {
    name: "company_name",
    rules: &[FieldRule::new(
        Constraint::MinChars(2),
        "Company name must be at least 2 characters",
    )],
};
const INDUSTRY: FieldSpec = FieldSpec {
    name: "industry",
    rules: &[FieldRule::new(
        Constraint::OneOf(&Industry::VALUES),
        "Please select your industry",
    )],
};
const PROJECT_TYPES: FieldSpec = FieldSpec {
    name: "project_types",
    rules: &[FieldRule::new(
        Constraint::MinChars(3),
        "Please list types of projects you're interested in",
    )],
};
const TEAM_SIZE: FieldSpec = FieldSpec {
    name: "team_size",
    rules: &[FieldRule::new(
        Constraint::OneOf(&TeamSize::VALUES),
        "Please select your team size",
    )],
};

const ROLE_MISMATCH: &str = "Profile details do not match your account type";

/// Raw engineer onboarding input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineerDraft {
    pub title: String,
    pub expertise: String,
    pub bio: String,
    /// Comma separated.
    pub skills: String,
    pub hourly_rate: String,
    pub experience_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDraft {
    pub company_name: String,
    pub industry: String,
    pub bio: String,
    /// Comma separated.
    pub project_types: String,
    pub team_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum ProfileDraft {
    #[serde(rename = "work")]
    Engineer(EngineerDraft),
    #[serde(rename = "hire")]
    Client(ClientDraft),
}

impl ProfileDraft {
    pub fn blank(role: Role) -> Self {
        match role {
            Role::Work => ProfileDraft::Engineer(EngineerDraft::default()),
            Role::Hire => ProfileDraft::Client(ClientDraft::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ProfileDraft::Engineer(_) => Role::Work,
            ProfileDraft::Client(_) => Role::Hire,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineerProfile {
    pub title: String,
    pub expertise: Expertise,
    pub bio: String,
    pub skills: SkillSet,
    pub hourly_rate: f64,
    pub experience_level: ExperienceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientProfile {
    pub company_name: String,
    pub industry: Industry,
    pub bio: String,
    pub project_types: Vec<String>,
    pub team_size: TeamSize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role")]
pub enum CompletedProfile {
    #[serde(rename = "work")]
    Engineer(EngineerProfile),
    #[serde(rename = "hire")]
    Client(ClientProfile),
}

impl CompletedProfile {
    pub fn role(&self) -> Role {
        match self {
            CompletedProfile::Engineer(_) => Role::Work,
            CompletedProfile::Client(_) => Role::Hire,
        }
    }
}

impl Validate for EngineerDraft {
    type Accepted = EngineerProfile;

    fn validate(&self) -> Result<EngineerProfile, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(&TITLE, &self.title);
        errors.check(&EXPERTISE, &self.expertise);
        errors.check(&BIO, &self.bio);
        errors.check(&SKILLS, &self.skills);
        errors.check(&HOURLY_RATE, &self.hourly_rate);
        errors.check(&EXPERIENCE_LEVEL, &self.experience_level);

        let skills = SkillSet::from_comma_list(&self.skills);
        if skills.is_empty() {
            reject_with_rule(&mut errors, &SKILLS);
        }
        errors.into_result()?;

        Ok(EngineerProfile {
            title: self.title.clone(),
            expertise: require(&EXPERTISE, Expertise::from_value(&self.expertise))?,
            bio: self.bio.clone(),
            skills,
            hourly_rate: require(&HOURLY_RATE, self.hourly_rate.trim().parse().ok())?,
            experience_level: require(
                &EXPERIENCE_LEVEL,
                ExperienceLevel::from_value(&self.experience_level),
            )?,
        })
    }
}

impl Validate for ClientDraft {
    type Accepted = ClientProfile;

    fn validate(&self) -> Result<ClientProfile, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(&COMPANY_NAME, &self.company_name);
        errors.check(&INDUSTRY, &self.industry);
        errors.check(&BIO, &self.bio);
        errors.check(&PROJECT_TYPES, &self.project_types);
        errors.check(&TEAM_SIZE, &self.team_size);

        let project_types = comma_list(&self.project_types);
        if project_types.is_empty() {
            reject_with_rule(&mut errors, &PROJECT_TYPES);
        }
        errors.into_result()?;

        Ok(ClientProfile {
            company_name: self.company_name.clone(),
            industry: require(&INDUSTRY, Industry::from_value(&self.industry))?,
            bio: self.bio.clone(),
            project_types,
            team_size: require(&TEAM_SIZE, TeamSize::from_value(&self.team_size))?,
        })
    }
}

impl Validate for ProfileDraft {
    type Accepted = CompletedProfile;

    fn validate(&self) -> Result<CompletedProfile, FieldErrors> {
        match self {
            ProfileDraft::Engineer(draft) => draft.validate().map(CompletedProfile::Engineer),
            ProfileDraft::Client(draft) => draft.validate().map(CompletedProfile::Client),
        }
    }
}

/// Typed value of a field whose rules already passed.
fn require<T>(spec: &FieldSpec, value: Option<T>) -> Result<T, FieldErrors> {
    value.ok_or_else(|| {
        let mut errors = FieldErrors::new();
        reject_with_rule(&mut errors, spec);
        errors
    })
}

/// Report `spec`'s first message unless the field already has one.
fn reject_with_rule(errors: &mut FieldErrors, spec: &FieldSpec) {
    if let Some(rule) = spec.rules.first() {
        errors.reject(spec.name, rule.message);
    }
}

fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Draft checked against the role the account was created with.
struct ForRole<'a> {
    role: Role,
    draft: &'a ProfileDraft,
}

impl Validate for ForRole<'_> {
    type Accepted = CompletedProfile;

    fn validate(&self) -> Result<CompletedProfile, FieldErrors> {
        if self.draft.role() != self.role {
            let mut errors = FieldErrors::new();
            errors.reject("role", ROLE_MISMATCH);
            return Err(errors);
        }
        self.draft.validate()
    }
}

/// Single-step onboarding form; which variant it expects comes from the account role.
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    role: Role,
    flow: FormFlow,
}

impl OnboardingWizard {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            flow: FormFlow::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> FormState {
        self.flow.state()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.flow.errors()
    }

    pub fn blank_draft(&self) -> ProfileDraft {
        ProfileDraft::blank(self.role)
    }

    pub fn edit(&mut self) {
        self.flow.edit();
    }

    pub fn submit(
        &mut self,
        draft: &ProfileDraft,
    ) -> Result<Submission<CompletedProfile>, FormError> {
        let checked = ForRole {
            role: self.role,
            draft,
        };
        let profile = match self.flow.submit(&checked) {
            Ok(profile) => profile,
            Err(err) => {
                debug!(role = self.role.as_str(), error = %err, "onboarding draft rejected");
                return Err(err);
            }
        };

        info!(role = self.role.as_str(), "profile draft accepted");
        debug!(profile = ?profile, "accepted profile");

        let (description, redirect) = match profile.role() {
            Role::Work => ("Your engineer profile is now live!", SiteRoute::own_profile()),
            Role::Hire => ("Your client profile is now live!", SiteRoute::Dashboard),
        };
        let notice = Notice {
            title: "Profile created successfully",
            description,
        };
        Ok(Submission::new(profile, notice, redirect))
    }
}

/// Select-box catalogs for the onboarding page.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingOptions {
    pub expertise: Vec<SelectOption>,
    pub experience_levels: Vec<SelectOption>,
    pub industries: Vec<SelectOption>,
    pub team_sizes: Vec<SelectOption>,
}

impl OnboardingOptions {
    pub fn catalog() -> Self {
        Self {
            expertise: Expertise::ALL
                .into_iter()
                .map(|item| SelectOption {
                    value: item.value(),
                    label: item.label(),
                })
                .collect(),
            experience_levels: ExperienceLevel::ALL
                .into_iter()
                .map(|item| SelectOption {
                    value: item.value(),
                    label: item.label(),
                })
                .collect(),
            industries: Industry::ALL
                .into_iter()
                .map(|item| SelectOption {
                    value: item.value(),
                    label: item.label(),
                })
                .collect(),
            team_sizes: TeamSize::ALL
                .into_iter()
                .map(|item| SelectOption {
                    value: item.value(),
                    label: item.label(),
                })
                .collect(),
        }
    }
}
