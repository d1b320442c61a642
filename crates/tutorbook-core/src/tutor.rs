use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tutor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub name: String,
    pub subject: String,
    #[serde(default)]
    pub years_experience: u32,
}

impl Tutor {
    pub fn builder() -> TutorBuilder {
        TutorBuilder::default()
    }
}

impl fmt::Display for Tutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} who teaches {} ({} years)",
            self.name, self.subject, self.years_experience
        )
    }
}

// ---------------------------------------------------------------------------
// TutorBuilder
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TutorBuilder {
    name: Option<String>,
    subject: Option<String>,
    years_experience: u32,
}

impl TutorBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn years_experience(mut self, years: u32) -> Self {
        self.years_experience = years;
        self
    }

    pub fn build(self) -> Result<Tutor> {
        Ok(Tutor {
            name: self.name.ok_or(BookingError::MissingField("name"))?,
            subject: self.subject.ok_or(BookingError::MissingField("subject"))?,
            years_experience: self.years_experience,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_builds_complete_tutor() {
        let tutor = Tutor::builder()
            .name("Alice")
            .subject("Math")
            .years_experience(7)
            .build()
            .unwrap();
        assert_eq!(tutor.name, "Alice");
        assert_eq!(tutor.to_string(), "Alice who teaches Math (7 years)");
    }

    #[test]
    fn builder_requires_name_and_subject() {
        let err = Tutor::builder().subject("Math").build().unwrap_err();
        assert!(matches!(err, BookingError::MissingField("name")));

        let err = Tutor::builder().name("Alice").build().unwrap_err();
        assert!(matches!(err, BookingError::MissingField("subject")));
    }
}
