use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map($name)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(JobId);
id_newtype!(ApplicationId);
id_newtype!(ResumeId);
id_newtype!(AnalysisId);
id_newtype!(FeedbackId);
id_newtype!(SavedJobId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownCode {}

/// Declares a closed code enum whose wire form is a short code (`"FT"`) and
/// whose parser also accepts the human label (`"full time"`, `"full-time"`).
macro_rules! code_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $code:literal, $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                let normalized = wanted.to_ascii_lowercase().replace(['-', '_'], " ");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.code().eq_ignore_ascii_case(wanted)
                            || v.label().eq_ignore_ascii_case(&normalized)
                    })
                    .ok_or_else(|| UnknownCode {
                        kind: $kind,
                        value: wanted.to_string(),
                    })
            }
        }
    };
}

code_enum!(JobType, "job type", {
    FullTime => "FT", "Full Time",
    PartTime => "PT", "Part Time",
    Contract => "CT", "Contract",
    Internship => "IN", "Internship",
    Remote => "RM", "Remote",
});

code_enum!(ExperienceLevel, "experience level", {
    Entry => "EN", "Entry Level",
    Junior => "JR", "Junior",
    Mid => "MD", "Mid Level",
    Senior => "SR", "Senior",
    Lead => "LD", "Lead",
    Manager => "MG", "Manager",
});

code_enum!(ApplicationStatus, "application status", {
    Pending => "P", "Pending",
    Reviewing => "R", "Reviewing",
    Shortlisted => "S", "Shortlisted",
    Rejected => "RJ", "Rejected",
    Hired => "H", "Hired",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Applicant,
    Recruiter,
}

impl FromStr for UserRole {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "applicant" => Ok(Self::Applicant),
            "recruiter" => Ok(Self::Recruiter),
            other => Err(UnknownCode {
                kind: "user role",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applicant => f.write_str("applicant"),
            Self::Recruiter => f.write_str("recruiter"),
        }
    }
}

/// Feedback category. The backend stores a free-form string, so values
/// outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackType {
    SkillGap,
    Formatting,
    Ats,
    Other(String),
}

impl From<String> for FeedbackType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "skill_gap" => Self::SkillGap,
            "formatting" => Self::Formatting,
            "ats" => Self::Ats,
            _ => Self::Other(value),
        }
    }
}

impl From<FeedbackType> for String {
    fn from(value: FeedbackType) -> Self {
        match value {
            FeedbackType::SkillGap => "skill_gap".to_string(),
            FeedbackType::Formatting => "formatting".to_string(),
            FeedbackType::Ats => "ats".to_string(),
            FeedbackType::Other(other) => other,
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkillGap => f.write_str("Skill gap"),
            Self::Formatting => f.write_str("Formatting"),
            Self::Ats => f.write_str("ATS"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Low => "low".to_string(),
            Severity::Medium => "medium".to_string(),
            Severity::High => "high".to_string(),
            Severity::Other(other) => other,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
