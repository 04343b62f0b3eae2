use std::fmt;

use serde::{Serialize, Deserialize};

/// Oldest age a roster row may carry
pub const MAX_AGE: u32 = 150;

/// Sex of a person as recorded in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parses the spellings found in real rosters (English and Hebrew)
    pub fn parse(value: &str) -> Option<Sex> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "זכר" | "גבר" => Some(Sex::Male),
            "female" | "f" | "woman" | "נקבה" | "אישה" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// One row of the uploaded roster. The index is the row position and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub index: usize,
    pub name: String,
    pub sex: Sex,
    pub age: u32,
    pub region: String,
}

/// Immutable, index-addressed collection of people loaded once per game
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: Vec<PersonRecord>,
}

impl Roster {
    /// Builds a roster, renumbering indices to match row positions
    pub fn new(people: Vec<PersonRecord>) -> Self {
        let people = people
            .into_iter()
            .enumerate()
            .map(|(index, person)| PersonRecord { index, ..person })
            .collect();
        Roster { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PersonRecord> {
        self.people.get(index)
    }

    pub fn people(&self) -> &[PersonRecord] {
        &self.people
    }

    /// Looks up a list of indices, skipping any that are out of range
    pub fn select(&self, indices: &[usize]) -> Vec<PersonRecord> {
        indices
            .iter()
            .filter_map(|&i| self.get(i).cloned())
            .collect()
    }

    pub fn ages(&self) -> Vec<u32> {
        self.people.iter().map(|p| p.age).collect()
    }
}

#[cfg(test)]
pub(crate) fn person(name: &str, sex: Sex, age: u32, region: &str) -> PersonRecord {
    PersonRecord {
        index: 0,
        name: name.to_string(),
        sex,
        age,
        region: region.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_accepts_hebrew_and_english() {
        assert_eq!(Sex::parse(" Female "), Some(Sex::Female));
        assert_eq!(Sex::parse("נקבה"), Some(Sex::Female));
        assert_eq!(Sex::parse("M"), Some(Sex::Male));
        assert_eq!(Sex::parse("גבר"), Some(Sex::Male));
        assert_eq!(Sex::parse("other"), None);
    }

    #[test]
    fn roster_renumbers_rows() {
        let roster = Roster::new(vec![
            person("Dana", Sex::Female, 30, "North"),
            person("Avi", Sex::Male, 41, "South"),
        ]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(1).map(|p| p.index), Some(1));
        assert_eq!(roster.get(1).map(|p| p.name.as_str()), Some("Avi"));
        assert!(roster.get(2).is_none());
    }

    #[test]
    fn select_skips_unknown_indices() {
        let roster = Roster::new(vec![person("Dana", Sex::Female, 30, "North")]);
        let picked = roster.select(&[0, 7]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "Dana");
    }
}
