use std::collections::HashMap;

use serde::Serialize;

use crate::roster::{PersonRecord, Sex};

/// Width of an age bucket in years
pub const DECADE: u32 = 10;

const CENTER_KEYWORDS: &[&str] = &["מרכז", "center", "centre"];
const SOUTH_KEYWORDS: &[&str] = &["דרום", "south"];

/// Half-open age interval `[start, end)` and how many ages fell in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBucket {
    pub start: u32,
    pub end: u32,
    pub count: usize,
}

impl AgeBucket {
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Label of the decade an age falls into, e.g. 34 -> "30-40"
pub fn decade_label(age: u32) -> String {
    let start = age / DECADE * DECADE;
    format!("{}-{}", start, start.saturating_add(DECADE))
}

/// Counts ages per decade from 0 up to and including the decade holding the oldest age.
///
/// Buckets are zero-filled and ascending. Returns `None` for an empty input.
/// An oldest age on a boundary opens its own bucket: 40 lands in `40-50` rather than
/// being folded into `30-40` as a closed last bin would. Ages are expected to be at
/// most [`MAX_AGE`](crate::roster::MAX_AGE); larger ones only cost more buckets.
pub fn decade_histogram(ages: &[u32]) -> Option<Vec<AgeBucket>> {
    let max_age = ages.iter().copied().max()?;
    let bucket_count = (max_age / DECADE) as usize + 1;

    let mut buckets: Vec<AgeBucket> = (0..bucket_count)
        .map(|i| {
            let start = (i as u32).saturating_mul(DECADE);
            AgeBucket { start, end: start.saturating_add(DECADE), count: 0 }
        })
        .collect();
    for &age in ages {
        buckets[(age / DECADE) as usize].count += 1;
    }
    Some(buckets)
}

pub fn mean_age(people: &[PersonRecord]) -> Option<f64> {
    if people.is_empty() {
        return None;
    }
    let total: u64 = people.iter().map(|p| u64::from(p.age)).sum();
    Some(total as f64 / people.len() as f64)
}

/// Median age; for an even count, the mean of the two middle ages
pub fn median_age(people: &[PersonRecord]) -> Option<f64> {
    if people.is_empty() {
        return None;
    }
    let mut ages: Vec<u32> = people.iter().map(|p| p.age).collect();
    ages.sort_unstable();
    let mid = ages.len() / 2;
    if ages.len() % 2 == 1 {
        Some(f64::from(ages[mid]))
    } else {
        Some((f64::from(ages[mid - 1]) + f64::from(ages[mid])) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Head-count per region, most populous first (ties alphabetical)
pub fn region_counts(people: &[PersonRecord]) -> Vec<RegionCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for person in people {
        *counts.entry(person.region.as_str()).or_insert(0) += 1;
    }
    let mut regions: Vec<RegionCount> = counts
        .into_iter()
        .map(|(region, count)| RegionCount { region: region.to_string(), count })
        .collect();
    regions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));
    regions
}

fn region_matches(region: &str, keywords: &[&str]) -> bool {
    let lower = region.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub fn is_center(region: &str) -> bool {
    region_matches(region, CENTER_KEYWORDS)
}

pub fn is_south(region: &str) -> bool {
    region_matches(region, SOUTH_KEYWORDS)
}

/// Women split by whether they live in a center region: `(center, not_center)`
pub fn female_center_split(people: &[PersonRecord]) -> (usize, usize) {
    people
        .iter()
        .filter(|p| p.sex == Sex::Female)
        .fold((0, 0), |(center, other), p| {
            if is_center(&p.region) {
                (center + 1, other)
            } else {
                (center, other + 1)
            }
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeSouthPoint {
    pub south: bool,
    pub age: u32,
    pub name: String,
    pub region: String,
}

pub fn age_by_south(people: &[PersonRecord]) -> Vec<AgeSouthPoint> {
    people
        .iter()
        .map(|p| AgeSouthPoint {
            south: is_south(&p.region),
            age: p.age,
            name: p.name.clone(),
            region: p.region.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{person, Roster};

    fn roster() -> Roster {
        Roster::new(vec![
            person("Noa", Sex::Female, 22, "מרכז העיר"),
            person("Dana", Sex::Female, 35, "North"),
            person("Yossi", Sex::Male, 58, "דרום"),
            person("Avi", Sex::Male, 41, "South-East"),
            person("Maya", Sex::Female, 30, "City Center"),
        ])
    }

    #[test]
    fn histogram_counts_each_decade() {
        let buckets = decade_histogram(&[5, 15, 25, 35]).unwrap();
        let summary: Vec<(String, usize)> = buckets.iter().map(|b| (b.label(), b.count)).collect();
        assert_eq!(
            summary,
            vec![
                ("0-10".to_string(), 1),
                ("10-20".to_string(), 1),
                ("20-30".to_string(), 1),
                ("30-40".to_string(), 1),
            ]
        );
    }

    #[test]
    fn histogram_zero_fills_and_includes_boundary_max() {
        let buckets = decade_histogram(&[40, 3]).unwrap();
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 0, 1]);
        assert_eq!(buckets.last().map(|b| (b.start, b.end)), Some((40, 50)));
    }

    #[test]
    fn histogram_of_nothing_is_no_data() {
        assert_eq!(decade_histogram(&[]), None);
        assert_eq!(decade_histogram(&[0]).map(|b| b.len()), Some(1));
    }

    #[test]
    fn decade_label_rounds_down() {
        assert_eq!(decade_label(34), "30-40");
        assert_eq!(decade_label(40), "40-50");
        assert_eq!(decade_label(0), "0-10");
    }

    #[test]
    fn decade_math_saturates_at_the_top() {
        assert_eq!(decade_label(u32::MAX), "4294967290-4294967295");
    }

    #[test]
    fn histogram_at_the_age_cap() {
        let buckets = decade_histogram(&[crate::roster::MAX_AGE, 0]).unwrap();
        assert_eq!(buckets.len(), 16);
        assert_eq!(buckets.last().map(|b| (b.start, b.end, b.count)), Some((150, 160, 1)));
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn mean_and_median() {
        let roster = roster();
        assert_eq!(mean_age(roster.people()), Some(37.2));
        assert_eq!(median_age(roster.people()), Some(35.0));
        assert_eq!(median_age(&roster.people()[..4]), Some(38.0));
        assert_eq!(mean_age(&[]), None);
        assert_eq!(median_age(&[]), None);
    }

    #[test]
    fn regions_sorted_by_count() {
        let people = vec![
            person("a", Sex::Male, 1, "South"),
            person("b", Sex::Male, 1, "North"),
            person("c", Sex::Male, 1, "South"),
            person("d", Sex::Male, 1, "East"),
        ];
        let counts = region_counts(&people);
        let names: Vec<&str> = counts.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["South", "East", "North"]);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn female_center_counts_only_women() {
        assert_eq!(female_center_split(roster().people()), (2, 1));
    }

    #[test]
    fn south_detection_in_both_languages() {
        let points = age_by_south(roster().people());
        let south: Vec<&str> = points.iter().filter(|p| p.south).map(|p| p.name.as_str()).collect();
        assert_eq!(south, vec!["Yossi", "Avi"]);
    }
}
