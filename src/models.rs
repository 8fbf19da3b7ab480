use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Academic percentage at or above which a student passes.
pub const PASS_THRESHOLD: u32 = 40;

/// Fees pending below this amount count as fully paid.
pub const PAID_TOLERANCE: f64 = 100.0;

/// A closed set of labelled values that can be picked from a filter control.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Control name, used in parse errors.
    const FIELD: &'static str;
    const VARIANTS: &'static [Self];

    fn label(&self) -> &'static str;

    /// Case-insensitive lookup by display label.
    fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(s))
    }

    fn parse_label(s: &str) -> Result<Self, DashboardError> {
        Self::from_label(s).ok_or_else(|| DashboardError::InvalidSelection {
            field: Self::FIELD,
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Choice for Gender {
    const FIELD: &'static str = "gender";
    const VARIANTS: &'static [Self] = &[Gender::Male, Gender::Female];

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLevel {
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "11th")]
    Eleventh,
    #[serde(rename = "12th")]
    Twelfth,
}

impl ClassLevel {
    /// Total fees owed for the year by every student in this class.
    pub fn total_fees(&self) -> f64 {
        match self {
            ClassLevel::Tenth => 45_000.0,
            ClassLevel::Eleventh => 55_000.0,
            ClassLevel::Twelfth => 65_000.0,
        }
    }
}

impl Choice for ClassLevel {
    const FIELD: &'static str = "class";
    const VARIANTS: &'static [Self] = &[ClassLevel::Tenth, ClassLevel::Eleventh, ClassLevel::Twelfth];

    fn label(&self) -> &'static str {
        match self {
            ClassLevel::Tenth => "10th",
            ClassLevel::Eleventh => "11th",
            ClassLevel::Twelfth => "12th",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
    D,
}

impl Choice for Section {
    const FIELD: &'static str = "section";
    const VARIANTS: &'static [Self] = &[Section::A, Section::B, Section::C, Section::D];

    fn label(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
            Section::C => "C",
            Section::D => "D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcademicYear {
    #[serde(rename = "2024-25")]
    Y2024,
    #[serde(rename = "2023-24")]
    Y2023,
    #[serde(rename = "2022-23")]
    Y2022,
    #[serde(rename = "2021-22")]
    Y2021,
    #[serde(rename = "2020-21")]
    Y2020,
}

impl Choice for AcademicYear {
    const FIELD: &'static str = "year";
    const VARIANTS: &'static [Self] = &[
        AcademicYear::Y2024,
        AcademicYear::Y2023,
        AcademicYear::Y2022,
        AcademicYear::Y2021,
        AcademicYear::Y2020,
    ];

    fn label(&self) -> &'static str {
        match self {
            AcademicYear::Y2024 => "2024-25",
            AcademicYear::Y2023 => "2023-24",
            AcademicYear::Y2022 => "2022-23",
            AcademicYear::Y2021 => "2021-22",
            AcademicYear::Y2020 => "2020-21",
        }
    }
}

/// Examination term. Selectable in the filter bar but records carry no
/// per-term marks, so it does not narrow the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    #[serde(rename = "Unit Test")]
    UnitTest,
    #[serde(rename = "Mid Term")]
    MidTerm,
    Final,
}

impl Choice for Term {
    const FIELD: &'static str = "term";
    const VARIANTS: &'static [Self] = &[Term::UnitTest, Term::MidTerm, Term::Final];

    fn label(&self) -> &'static str {
        match self {
            Term::UnitTest => "Unit Test",
            Term::MidTerm => "Mid Term",
            Term::Final => "Final",
        }
    }
}

/// Subject. Like [`Term`], declared for the filter bar only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Mathematics,
    Science,
    English,
    #[serde(rename = "Social Studies")]
    SocialStudies,
}

impl Choice for Subject {
    const FIELD: &'static str = "subject";
    const VARIANTS: &'static [Self] = &[
        Subject::Mathematics,
        Subject::Science,
        Subject::English,
        Subject::SocialStudies,
    ];

    fn label(&self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::SocialStudies => "Social Studies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeStatus {
    Paid,
    Pending,
}

impl FeeStatus {
    pub fn from_pending(fees_pending: f64) -> Self {
        if fees_pending < PAID_TOLERANCE {
            FeeStatus::Paid
        } else {
            FeeStatus::Pending
        }
    }
}

impl Choice for FeeStatus {
    const FIELD: &'static str = "fee status";
    const VARIANTS: &'static [Self] = &[FeeStatus::Paid, FeeStatus::Pending];

    fn label(&self) -> &'static str {
        match self {
            FeeStatus::Paid => "Paid",
            FeeStatus::Pending => "Pending",
        }
    }
}

macro_rules! choice_display_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = DashboardError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Choice>::parse_label(s)
                }
            }
        )+
    };
}

choice_display_from_str!(Gender, ClassLevel, Section, AcademicYear, Term, Subject, FeeStatus);

/// The value of a single filter control: either unconstrained or one choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Choice> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Step forward through `All`, then each variant in order, wrapping.
    pub fn next(&self) -> Self {
        match self {
            Selection::All => T::VARIANTS.first().copied().map_or(Selection::All, Selection::Only),
            Selection::Only(current) => {
                let pos = T::VARIANTS.iter().position(|v| v == current);
                match pos.and_then(|p| T::VARIANTS.get(p + 1)) {
                    Some(v) => Selection::Only(*v),
                    None => Selection::All,
                }
            }
        }
    }

    /// Step backward; the inverse of [`Selection::next`].
    pub fn prev(&self) -> Self {
        match self {
            Selection::All => T::VARIANTS.last().copied().map_or(Selection::All, Selection::Only),
            Selection::Only(current) => match T::VARIANTS.iter().position(|v| v == current) {
                Some(p) if p > 0 => Selection::Only(T::VARIANTS[p - 1]),
                _ => Selection::All,
            },
        }
    }
}

impl<T: Choice> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(v) => f.write_str(v.label()),
        }
    }
}

impl<T: Choice> FromStr for Selection<T> {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            T::parse_label(s).map(Selection::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub class: ClassLevel,
    pub section: Section,
    pub year: AcademicYear,
    pub attendance: u32,
    pub percentage: u32,
    pub total_fees: f64,
    pub fees_paid: f64,
    pub fees_pending: f64,
    pub fee_status: FeeStatus,
}

impl StudentRecord {
    pub fn is_pass(&self) -> bool {
        self.percentage >= PASS_THRESHOLD
    }

    /// `10th-A` style label used by the table.
    pub fn class_section(&self) -> String {
        format!("{}-{}", self.class, self.section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parsing() {
        assert_eq!("10th".parse::<ClassLevel>().unwrap(), ClassLevel::Tenth);
        assert_eq!("social studies".parse::<Subject>().unwrap(), Subject::SocialStudies);
        assert_eq!(" 2022-23 ".parse::<AcademicYear>().unwrap(), AcademicYear::Y2022);
        assert!("13th".parse::<ClassLevel>().is_err());
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("All".parse::<Selection<Gender>>().unwrap(), Selection::All);
        assert_eq!("all".parse::<Selection<Gender>>().unwrap(), Selection::All);
        assert_eq!(
            "Female".parse::<Selection<Gender>>().unwrap(),
            Selection::Only(Gender::Female)
        );
        assert_eq!(Selection::Only(Section::C).to_string(), "C");
        assert_eq!(Selection::<Section>::All.to_string(), "All");
    }

    #[test]
    fn test_selection_cycling_wraps() {
        let mut s = Selection::<ClassLevel>::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            s = s.next();
            seen.push(s);
        }
        assert_eq!(
            seen,
            vec![
                Selection::Only(ClassLevel::Tenth),
                Selection::Only(ClassLevel::Eleventh),
                Selection::Only(ClassLevel::Twelfth),
                Selection::All,
            ]
        );
        assert_eq!(Selection::<ClassLevel>::All.prev(), Selection::Only(ClassLevel::Twelfth));
        assert_eq!(Selection::Only(ClassLevel::Tenth).prev(), Selection::All);
    }

    #[test]
    fn test_fee_status_threshold() {
        assert_eq!(FeeStatus::from_pending(0.0), FeeStatus::Paid);
        assert_eq!(FeeStatus::from_pending(99.99), FeeStatus::Paid);
        assert_eq!(FeeStatus::from_pending(100.0), FeeStatus::Pending);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&ClassLevel::Eleventh).unwrap();
        assert_eq!(json, "\"11th\"");
        let parsed: AcademicYear = serde_json::from_str("\"2020-21\"").unwrap();
        assert_eq!(parsed, AcademicYear::Y2020);
    }
}
