use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::flow::{FormError, FormFlow, Notice, Submission, Validate};
use super::onboarding::Role;
use super::validation::{Constraint, FieldErrors, FieldRule, FieldSpec, EMAIL_FIELD, PASSWORD};
use crate::marketplace::site::SiteRoute;

const NAME: FieldSpec = FieldSpec {
    name: "name",
    rules: &[FieldRule::new(
        Constraint::MinChars(2),
        "Name must be at least 2 characters",
    )],
};

const PASSWORD_MISMATCH: &str = "Passwords don't match";

pub const LOGIN_FAILED: Notice = Notice {
    title: "Login failed",
    description: "Please check your credentials and try again.",
};

pub const SIGNUP_FAILED: Notice = Notice {
    title: "Registration failed",
    description: "Please try again with different credentials.",
};

#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignupDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDraft")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SignupDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Accepted login input handed to the authenticator.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Validate for LoginDraft {
    type Accepted = Credentials;

    fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(&EMAIL_FIELD, &self.email);
        errors.check(&PASSWORD, &self.password);
        errors.into_result()?;

        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

impl Validate for SignupDraft {
    type Accepted = Registration;

    fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(&NAME, &self.name);
        errors.check(&EMAIL_FIELD, &self.email);
        errors.check(&PASSWORD, &self.password);
        if self.password != self.confirm_password {
            errors.reject("confirm_password", PASSWORD_MISMATCH);
        }
        errors.into_result()?;

        Ok(Registration {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

/// Public part of an account returned to the caller after login or signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("credentials were rejected")]
    Rejected,
    #[error("email is already registered")]
    AlreadyRegistered,
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Identity backend behind the login and signup forms.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Account, AuthError>;

    async fn register(&self, registration: &Registration) -> Result<Account, AuthError>;
}

/// Accepts every well-formed draft without checking anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedAuthenticator;

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn login(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        Ok(Account {
            email: credentials.email.clone(),
            name: None,
            role: None,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<Account, AuthError> {
        Ok(Account {
            email: registration.email.clone(),
            name: Some(registration.name.clone()),
            role: Some(registration.role),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("{}: {source}", .notice.title)]
    Backend {
        notice: Notice,
        #[source]
        source: AuthError,
    },
}

impl AuthFailure {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            AuthFailure::Form(_) => None,
            AuthFailure::Backend { notice, .. } => Some(*notice),
        }
    }
}

/// Login and signup forms wired to an authenticator.
pub struct AuthService<A> {
    authenticator: Arc<A>,
}

impl<A> AuthService<A>
where
    A: Authenticator + 'static,
{
    pub fn new(authenticator: Arc<A>) -> Self {
        Self { authenticator }
    }

    /// Submit a login draft through `flow`; the flow records rejection messages.
    pub async fn login(
        &self,
        flow: &mut FormFlow,
        draft: &LoginDraft,
    ) -> Result<Submission<Account>, AuthFailure> {
        let credentials = flow.submit(draft)?;
        match self.authenticator.login(&credentials).await {
            Ok(account) => {
                info!(email = %account.email, "login accepted");
                let notice = Notice {
                    title: "Login successful",
                    description: "Welcome back to FoundYou!",
                };
                Ok(Submission::new(account, notice, SiteRoute::Home))
            }
            Err(source) => {
                warn!(email = %credentials.email, error = %source, "login failed");
                flow.reopen();
                Err(AuthFailure::Backend {
                    notice: LOGIN_FAILED,
                    source,
                })
            }
        }
    }

    pub async fn signup(
        &self,
        flow: &mut FormFlow,
        draft: &SignupDraft,
    ) -> Result<Submission<Account>, AuthFailure> {
        let registration = flow.submit(draft)?;
        match self.authenticator.register(&registration).await {
            Ok(account) => {
                info!(email = %account.email, role = registration.role.as_str(), "account created");
                let notice = Notice {
                    title: "Account created successfully",
                    description: "Welcome to FoundYou! Let's complete your profile.",
                };
                Ok(Submission::new(account, notice, SiteRoute::Onboarding))
            }
            Err(source) => {
                warn!(email = %registration.email, error = %source, "registration failed");
                flow.reopen();
                Err(AuthFailure::Backend {
                    notice: SIGNUP_FAILED,
                    source,
                })
            }
        }
    }
}
