use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// LessonKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Math,
    Programming,
    English,
}

impl LessonKind {
    pub fn all() -> &'static [LessonKind] {
        &[LessonKind::Math, LessonKind::Programming, LessonKind::English]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LessonKind::Math => "math",
            LessonKind::Programming => "programming",
            LessonKind::English => "english",
        }
    }

    /// Price of a single lesson before add-ons or discounts.
    pub fn base_price(self) -> f64 {
        match self {
            LessonKind::Math => 40.0,
            LessonKind::Programming => 55.0,
            LessonKind::English => 35.0,
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LessonKind {
    type Err = crate::error::BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "math" => Ok(LessonKind::Math),
            "programming" => Ok(LessonKind::Programming),
            "english" => Ok(LessonKind::English),
            _ => Err(crate::error::BookingError::UnknownLessonType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AddOn
// ---------------------------------------------------------------------------

/// Stackable lesson extras. A booking carries a list of tags rather than a
/// chain of wrapper types; `describe_with_addons` renders the whole stack
/// in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    Recorded,
    Materials,
    Premium,
}

impl AddOn {
    pub fn all() -> &'static [AddOn] {
        &[AddOn::Recorded, AddOn::Materials, AddOn::Premium]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AddOn::Recorded => "recorded",
            AddOn::Materials => "materials",
            AddOn::Premium => "premium",
        }
    }

    /// Flat per-lesson surcharge.
    pub fn surcharge(self) -> f64 {
        match self {
            AddOn::Recorded => 5.0,
            AddOn::Materials => 8.0,
            AddOn::Premium => 20.0,
        }
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AddOn {
    type Err = crate::error::BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recorded" => Ok(AddOn::Recorded),
            "materials" => Ok(AddOn::Materials),
            "premium" => Ok(AddOn::Premium),
            _ => Err(crate::error::BookingError::UnknownAddOn(s.to_string())),
        }
    }
}

/// Render a lesson plus its add-on stack, applied in order, e.g.
/// `"programming lesson (+recorded, +premium)"`.
pub fn describe_with_addons(kind: LessonKind, add_ons: &[AddOn]) -> String {
    if add_ons.is_empty() {
        return format!("{kind} lesson");
    }
    let tags: Vec<String> = add_ons.iter().map(|a| format!("+{a}")).collect();
    format!("{kind} lesson ({})", tags.join(", "))
}

/// Per-lesson price including add-on surcharges.
pub fn price_with_addons(kind: LessonKind, add_ons: &[AddOn]) -> f64 {
    kind.base_price() + add_ons.iter().map(|a| a.surcharge()).sum::<f64>()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_kind_parsing_is_case_insensitive() {
        assert_eq!("Math".parse::<LessonKind>().unwrap(), LessonKind::Math);
        assert_eq!(
            "PROGRAMMING".parse::<LessonKind>().unwrap(),
            LessonKind::Programming
        );
    }

    #[test]
    fn unknown_lesson_kind_rejected() {
        let err = "chemistry".parse::<LessonKind>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::BookingError::UnknownLessonType(_)
        ));
    }

    #[test]
    fn addon_stack_renders_in_order() {
        assert_eq!(
            describe_with_addons(LessonKind::Programming, &[AddOn::Recorded, AddOn::Premium]),
            "programming lesson (+recorded, +premium)"
        );
        assert_eq!(
            describe_with_addons(LessonKind::English, &[]),
            "english lesson"
        );
    }

    #[test]
    fn addon_surcharges_accumulate() {
        let price = price_with_addons(LessonKind::Math, &[AddOn::Materials, AddOn::Premium]);
        assert_eq!(price, 40.0 + 8.0 + 20.0);
    }
}
