//! Candidate profile value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{
    EmptyProfileFieldError, InvalidDomainError, InvalidExperienceLevelError,
};

/// Candidate experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Intermediate,
    Senior,
}

impl ExperienceLevel {
    /// All levels, in ascending order
    pub const ALL: [Self; 3] = [Self::Entry, Self::Intermediate, Self::Senior];

    /// Get the wire/string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Intermediate => "intermediate",
            Self::Senior => "senior",
        }
    }

    /// Human-readable label for prompts and summaries
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Entry => "Entry Level",
            Self::Intermediate => "Intermediate",
            Self::Senior => "Senior",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = InvalidExperienceLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Ok(Self::Entry),
            "intermediate" => Ok(Self::Intermediate),
            "senior" => Ok(Self::Senior),
            _ => Err(InvalidExperienceLevelError {
                input: s.to_string(),
            }),
        }
    }
}

/// Interview practice domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterviewDomain {
    #[default]
    SoftwareEngineering,
    DataScience,
    ProductManagement,
}

impl InterviewDomain {
    /// All domains offered by the coach service
    pub const ALL: [Self; 3] = [
        Self::SoftwareEngineering,
        Self::DataScience,
        Self::ProductManagement,
    ];

    /// Get the wire/string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SoftwareEngineering => "software_engineering",
            Self::DataScience => "data_science",
            Self::ProductManagement => "product_management",
        }
    }

    /// Human-readable label for prompts and summaries
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SoftwareEngineering => "Software Engineering",
            Self::DataScience => "Data Science",
            Self::ProductManagement => "Product Management",
        }
    }
}

impl fmt::Display for InterviewDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InterviewDomain {
    type Err = InvalidDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "software_engineering" | "software-engineering" => Ok(Self::SoftwareEngineering),
            "data_science" | "data-science" => Ok(Self::DataScience),
            "product_management" | "product-management" => Ok(Self::ProductManagement),
            _ => Err(InvalidDomainError {
                input: s.to_string(),
            }),
        }
    }
}

/// Candidate profile collected at launch.
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    name: String,
    experience_level: ExperienceLevel,
    domain: InterviewDomain,
}

impl CandidateProfile {
    /// Create a profile. The name must be non-empty after trimming.
    pub fn new(
        name: impl Into<String>,
        experience_level: ExperienceLevel,
        domain: InterviewDomain,
    ) -> Result<Self, EmptyProfileFieldError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EmptyProfileFieldError { field: "name" });
        }
        Ok(Self {
            name,
            experience_level,
            domain,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    pub fn domain(&self) -> InterviewDomain {
        self.domain
    }
}
