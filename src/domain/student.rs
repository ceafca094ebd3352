use super::fee_schedule::ScheduleKey;
use super::identity::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub String);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The class a student is enrolled in for one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAssignment {
    pub class_id: ClassId,
    pub level: String,
    pub curriculum: String,
    pub academic_year: String,
}

impl ClassAssignment {
    /// The fee schedule key this enrolment is billed under.
    pub fn schedule_key(&self) -> ScheduleKey {
        ScheduleKey {
            level: self.level.clone(),
            curriculum: self.curriculum.clone(),
            academic_year: self.academic_year.clone(),
        }
    }
}

/// A student as seen through the student directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: Option<String>,
    pub class: Option<ClassAssignment>,
    pub guardians: Vec<UserId>,
}

impl Student {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: StudentId(id.into()),
            name: None,
            class: None,
            guardians: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: ClassAssignment) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_guardian(mut self, guardian: impl Into<String>) -> Self {
        self.guardians.push(UserId(guardian.into()));
        self
    }

    pub fn is_guarded_by(&self, user: &UserId) -> bool {
        self.guardians.contains(user)
    }

    pub fn class_id(&self) -> Option<&ClassId> {
        self.class.as_ref().map(|class| &class.class_id)
    }
}
