//! Form Validation
//!
//! Raw form field state as typed by the user, and the checks that turn it
//! into a request body. Validation runs before any request is issued.

use thiserror::Error;

use crate::dto::{LoginRequest, NewComment, NewVlog, PredictionRequest, RegisterRequest};
use crate::models::Profile;

/// Accepted age range for optional age fields
pub const AGE_RANGE: (u32, u32) = (1, 120);

/// Values offered by gender selects
pub const GENDERS: [&str; 3] = ["male", "female", "other"];

/// Form validation errors, rendered inline next to the form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{0} must be a number")]
    NotANumber(&'static str),
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse an optional age field; blank means not given
pub fn parse_age(value: &str) -> Result<Option<u32>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let age: u32 = trimmed.parse().map_err(|_| ValidationError::NotANumber("Age"))?;
    let (min, max) = AGE_RANGE;
    if !(min..=max).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: "Age",
            min,
            max,
        });
    }
    Ok(Some(age))
}

// ============ Auth ============

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = required(&self.email, "Email")?;
        // Passwords are sent as typed, never trimmed
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }

        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub age: String,
    pub gender: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let name = required(&self.name, "Name")?;
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(RegisterRequest {
            name,
            email,
            password: self.password.clone(),
            phone: optional(&self.phone),
            age: parse_age(&self.age)?,
            gender: optional(&self.gender),
        })
    }
}

// ============ Predictor ============

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionForm {
    pub symptoms: String,
    pub age: String,
    pub gender: String,
    pub lifestyle: String,
    pub medical_history: String,
}

impl PredictionForm {
    pub fn validate(&self) -> Result<PredictionRequest, ValidationError> {
        Ok(PredictionRequest {
            symptoms: required(&self.symptoms, "Symptoms")?,
            age: parse_age(&self.age)?,
            gender: optional(&self.gender),
            lifestyle: optional(&self.lifestyle),
            medical_history: optional(&self.medical_history),
        })
    }
}

// ============ Stories ============

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVlogForm {
    pub title: String,
    pub description: String,
    pub disease: String,
    pub medicines: String,
    pub hospitals: String,
    pub recovery_timeline: String,
    pub video_url: String,
}

impl NewVlogForm {
    pub fn validate(&self) -> Result<NewVlog, ValidationError> {
        Ok(NewVlog {
            title: required(&self.title, "Title")?,
            description: required(&self.description, "Description")?,
            disease_category: required(&self.disease, "Disease")?,
            medicines_used: optional(&self.medicines),
            hospital_visited: optional(&self.hospitals),
            recovery_timeline: optional(&self.recovery_timeline),
            video_url: optional(&self.video_url),
        })
    }
}

/// Build a comment body; blank comments are rejected
pub fn validate_comment(vlog_id: &str, text: &str) -> Result<NewComment, ValidationError> {
    Ok(NewComment {
        vlog_id: vlog_id.to_string(),
        comment_text: required(text, "Comment")?,
    })
}

// ============ Profile ============

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
    pub gender: String,
    pub medical_history: String,
    pub lifestyle: String,
    pub emergency_contact: String,
}

impl From<&Profile> for ProfileForm {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            age: profile.age.map(|a| a.to_string()).unwrap_or_default(),
            gender: profile.gender.clone().unwrap_or_default(),
            medical_history: profile.medical_history.clone().unwrap_or_default(),
            lifestyle: profile.lifestyle.clone().unwrap_or_default(),
            emergency_contact: profile.emergency_contact.clone().unwrap_or_default(),
        }
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<Profile, ValidationError> {
        Ok(Profile {
            name: required(&self.name, "Name")?,
            email: required(&self.email, "Email")?,
            phone: optional(&self.phone),
            age: parse_age(&self.age)?,
            gender: optional(&self.gender),
            medical_history: optional(&self.medical_history),
            lifestyle: optional(&self.lifestyle),
            emergency_contact: optional(&self.emergency_contact),
        })
    }
}
