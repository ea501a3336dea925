//! Sign-in and sign-up form validation.
//!
//! DESIGN
//! ======
//! Validation is pure: it never touches the network or shared state, and a
//! failure is simply a non-empty [`ValidationErrors`]. Password rules are
//! checked independently so the message can list every missing requirement
//! instead of stopping at the first one.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Which form is being validated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// Raw form input. `full_name` and `confirm_password` only matter on sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Credentials {
    pub fn sign_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into(), ..Self::default() }
    }

    pub fn sign_up(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

/// Form fields that can carry an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Field-level error messages. Empty means the input is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {message}", field.as_str())?;
        }
        Ok(())
    }
}

/// One unmet password requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordIssue {
    TooShort,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl PasswordIssue {
    fn requirement(self) -> &'static str {
        match self {
            Self::TooShort => "at least 6 characters",
            Self::MissingLowercase => "a lowercase letter",
            Self::MissingUppercase => "an uppercase letter",
            Self::MissingDigit => "a number",
            Self::MissingSymbol => "a symbol",
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // local part, `@`, then dot-separated labels with at least one dot.
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `email` is a plausible `local@domain.tld` address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Every password requirement `password` fails, in display order.
pub fn password_issues(password: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        issues.push(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push(PasswordIssue::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        issues.push(PasswordIssue::MissingSymbol);
    }
    issues
}

/// Render password issues as one sentence, e.g.
/// `"Password must be at least 6 characters and contain a number"`.
fn password_message(issues: &[PasswordIssue]) -> Option<String> {
    let (too_short, missing): (Vec<PasswordIssue>, Vec<PasswordIssue>) =
        issues.iter().copied().partition(|i| *i == PasswordIssue::TooShort);
    let missing = missing.into_iter().map(PasswordIssue::requirement).collect::<Vec<_>>().join(", ");
    match (too_short.is_empty(), missing.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!("Password must be {}", PasswordIssue::TooShort.requirement())),
        (true, false) => Some(format!("Password must contain {missing}")),
        (false, false) => Some(format!(
            "Password must be {} and contain {missing}",
            PasswordIssue::TooShort.requirement()
        )),
    }
}

/// Validate `credentials` for `mode`.
pub fn validate(mode: AuthMode, credentials: &Credentials) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if mode == AuthMode::SignUp && credentials.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required");
    }

    let email = credentials.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, "Invalid email address");
    }

    if let Some(message) = password_message(&password_issues(&credentials.password)) {
        errors.insert(Field::Password, message);
    }

    if mode == AuthMode::SignUp {
        if credentials.confirm_password.is_empty() {
            errors.insert(Field::ConfirmPassword, "Confirm password is required");
        } else if credentials.confirm_password != credentials.password {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }
    }

    errors
}
