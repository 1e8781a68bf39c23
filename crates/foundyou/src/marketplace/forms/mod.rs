//! Onboarding and account forms: field rules, the submit state machine, and success signals.

pub mod auth;
pub mod flow;
pub mod onboarding;
pub mod validation;

pub use auth::{
    Account, AuthError, AuthFailure, AuthService, Authenticator, Credentials, LoginDraft,
    Registration, SignupDraft, SimulatedAuthenticator,
};
pub use flow::{FormError, FormFlow, FormState, Notice, Submission, Validate, REDIRECT_DELAY};
pub use onboarding::{
    ClientDraft, ClientProfile, CompletedProfile, EngineerDraft, EngineerProfile,
    ExperienceLevel, Expertise, Industry, OnboardingOptions, OnboardingWizard, ProfileDraft,
    Role, SelectOption, TeamSize,
};
pub use validation::{Constraint, FieldErrors, FieldRule, FieldSpec};
