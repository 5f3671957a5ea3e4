//! Resume reference data shown beside the contact form.
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ResumeLoadError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("invalid resume JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("resume has no personal info")]
    MissingPersonalInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub graduation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl ResumeData {
    /// # Errors
    ///
    /// Fails when the JSON is malformed or has no `personalInfo` block.
    pub fn from_json(json: &str) -> Result<Self, ResumeLoadError> {
        let data: Self = serde_json::from_str(json)?;
        if data.personal_info.is_none() {
            return Err(ResumeLoadError::MissingPersonalInfo);
        }
        Ok(data)
    }

    /// Built-in data used whenever the hosted resume cannot be loaded.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            personal_info: Some(PersonalInfo {
                name: String::from("Dev Patel"),
                title: String::from("Software Developer"),
                email: String::from("contact@example.com"),
                ..PersonalInfo::default()
            }),
            skills: Skills {
                frontend: ["JavaScript", "React", "TypeScript"]
                    .map(String::from)
                    .to_vec(),
                backend: Vec::new(),
            },
            experience: vec![Experience {
                title: String::from("Developer"),
                company: String::from("Company"),
                duration: String::from("2022-Present"),
            }],
            education: vec![Education {
                degree: String::from("Computer Science"),
                institution: String::from("University"),
                graduation: String::from("2020"),
            }],
        }
    }

    /// Personal info, or empty fields when absent.
    #[must_use]
    pub fn info(&self) -> PersonalInfo {
        self.personal_info.clone().unwrap_or_default()
    }

    /// Up to `n` frontend skills for the sidebar.
    #[must_use]
    pub fn top_skills(&self, n: usize) -> &[String] {
        let len = self.skills.frontend.len().min(n);
        &self.skills.frontend[..len]
    }

    #[must_use]
    pub fn recent_experience(&self, n: usize) -> &[Experience] {
        let len = self.experience.len().min(n);
        &self.experience[..len]
    }
}
