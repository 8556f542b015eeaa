use crate::backend::models::{
    AboutUpload, ContactMessage, Credentials, FileUpload, ProjectPayload, SkillPayload,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

pub trait Validate {
    fn validate(&self) -> Result<(), FormError>;
}

fn require(label: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Missing(label))
    } else {
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), FormError> {
        require("Name", &self.name)?;
        require("Email", &self.email)?;
        require("Message", &self.message)?;
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }
}

impl From<&ContactForm> for ContactMessage {
    fn from(form: &ContactForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FormError> {
        require("Email", &self.email)?;
        require("Password", &self.password)
    }
}

impl From<&LoginForm> for Credentials {
    fn from(form: &LoginForm) -> Self {
        Self {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillForm {
    pub name: String,
    pub icon: String,
    pub category: String,
    pub level: String,
}

impl Validate for SkillForm {
    fn validate(&self) -> Result<(), FormError> {
        require("Skill name", &self.name)?;
        require("Icon", &self.icon)
    }
}

impl From<&SkillForm> for SkillPayload {
    fn from(form: &SkillForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            icon: form.icon.trim().to_string(),
            category: form.category.trim().to_string(),
            level: form.level.trim().to_string(),
        }
    }
}

/// Project editor state. `existing_image` carries the current image through
/// an edit so that saving without a new file keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub live_link: String,
    pub github_link: String,
    pub existing_image: String,
}

impl ProjectForm {
    pub fn into_payload(self, image: String) -> ProjectPayload {
        ProjectPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tech_stack: self.tech_stack.trim().to_string(),
            image,
            live_link: self.live_link.trim().to_string(),
            github_link: self.github_link.trim().to_string(),
        }
    }
}

impl Validate for ProjectForm {
    fn validate(&self) -> Result<(), FormError> {
        require("Project title", &self.title)?;
        require("Project description", &self.description)?;
        require("Tech stack", &self.tech_stack)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AboutForm {
    pub name: String,
    pub bio: String,
}

impl AboutForm {
    pub fn into_upload(
        self,
        profile_pic: Option<FileUpload>,
        resume: Option<FileUpload>,
    ) -> AboutUpload {
        AboutUpload {
            name: self.name.trim().to_string(),
            bio: self.bio.trim().to_string(),
            profile_pic,
            resume,
        }
    }
}

impl Validate for AboutForm {
    fn validate(&self) -> Result<(), FormError> {
        require("Name", &self.name)?;
        require("Bio", &self.bio)
    }
}
