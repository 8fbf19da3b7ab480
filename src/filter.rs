use crate::models::{
    AcademicYear, ClassLevel, Gender, Section, Selection, StudentRecord, Subject, Term,
};
use log::debug;

/// Current value of every filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterSelection {
    pub year: Selection<AcademicYear>,
    pub term: Selection<Term>,
    pub class: Selection<ClassLevel>,
    pub section: Selection<Section>,
    pub subject: Selection<Subject>,
    pub gender: Selection<Gender>,
}

impl FilterSelection {
    /// Term and subject are not consulted: records carry a single overall
    /// percentage with no per-term or per-subject breakdown.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.year.matches(&record.year)
            && self.class.matches(&record.class)
            && self.section.matches(&record.section)
            && self.gender.matches(&record.gender)
    }

    /// Matching records, cloned, in input order.
    pub fn apply(&self, records: &[StudentRecord]) -> Vec<StudentRecord> {
        if !self.term.is_all() || !self.subject.is_all() {
            debug!(
                "Term ({}) and subject ({}) selections do not narrow the record set",
                self.term, self.subject
            );
        }
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    pub fn value_label(&self, field: FilterField) -> String {
        match field {
            FilterField::Year => self.year.to_string(),
            FilterField::Term => self.term.to_string(),
            FilterField::Class => self.class.to_string(),
            FilterField::Section => self.section.to_string(),
            FilterField::Subject => self.subject.to_string(),
            FilterField::Gender => self.gender.to_string(),
        }
    }

    /// Move one control to its next (or previous) value.
    pub fn cycle(&mut self, field: FilterField, forward: bool) {
        fn step<T: crate::models::Choice>(s: &mut Selection<T>, forward: bool) {
            *s = if forward { s.next() } else { s.prev() };
        }
        match field {
            FilterField::Year => step(&mut self.year, forward),
            FilterField::Term => step(&mut self.term, forward),
            FilterField::Class => step(&mut self.class, forward),
            FilterField::Section => step(&mut self.section, forward),
            FilterField::Subject => step(&mut self.subject, forward),
            FilterField::Gender => step(&mut self.gender, forward),
        }
    }
}

/// One of the six filter controls, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Year,
    Term,
    Class,
    Section,
    Subject,
    Gender,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Year,
        FilterField::Term,
        FilterField::Class,
        FilterField::Section,
        FilterField::Subject,
        FilterField::Gender,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Year => "Year",
            FilterField::Term => "Term",
            FilterField::Class => "Class",
            FilterField::Section => "Section",
            FilterField::Subject => "Subject",
            FilterField::Gender => "Gender",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RecordGenerator;

    #[test]
    fn test_all_is_a_no_op() {
        let records = RecordGenerator::new(21).generate();
        let filtered = FilterSelection::default().apply(&records);
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_single_field_filter() {
        let records = RecordGenerator::new(22).generate();
        let selection = FilterSelection {
            class: Selection::Only(ClassLevel::Tenth),
            ..Default::default()
        };
        let filtered = selection.apply(&records);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|r| r.class == ClassLevel::Tenth));
        let expected = records.iter().filter(|r| r.class == ClassLevel::Tenth).count();
        assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn test_filters_compose_as_intersection() {
        let records = RecordGenerator::new(23).generate();
        let selection = FilterSelection {
            year: Selection::Only(AcademicYear::Y2022),
            class: Selection::Only(ClassLevel::Twelfth),
            section: Selection::Only(Section::B),
            gender: Selection::Only(Gender::Female),
            ..Default::default()
        };
        let filtered = selection.apply(&records);
        let expected: Vec<_> = records
            .iter()
            .filter(|r| {
                r.year == AcademicYear::Y2022
                    && r.class == ClassLevel::Twelfth
                    && r.section == Section::B
                    && r.gender == Gender::Female
            })
            .cloned()
            .collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_term_and_subject_do_not_filter() {
        let records = RecordGenerator::new(24).generate();
        let selection = FilterSelection {
            term: Selection::Only(Term::Final),
            subject: Selection::Only(Subject::English),
            ..Default::default()
        };
        assert_eq!(selection.apply(&records).len(), records.len());
    }

    #[test]
    fn test_cycle_and_field_order() {
        let mut selection = FilterSelection::default();
        selection.cycle(FilterField::Gender, true);
        assert_eq!(selection.gender, Selection::Only(Gender::Male));
        assert_eq!(selection.value_label(FilterField::Gender), "Male");
        selection.cycle(FilterField::Gender, false);
        assert_eq!(selection.value_label(FilterField::Gender), "All");

        assert_eq!(FilterField::Gender.next(), FilterField::Year);
        assert_eq!(FilterField::Year.prev(), FilterField::Gender);
    }
}
