use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::stats::{decade_histogram, decade_label, AgeBucket};
use crate::roster::{PersonRecord, Roster, Sex};

/// Picks `size` distinct members of `population`, or `None` when there are too few.
/// The population itself is left untouched.
pub fn sample_indices<R: Rng + ?Sized>(population: &[usize], size: usize, rng: &mut R) -> Option<Vec<usize>> {
    if population.len() < size {
        return None;
    }
    Some(population.choose_multiple(rng, size).copied().collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePoint {
    pub decade: String,
    pub region: String,
    pub sex: Sex,
    pub name: String,
    pub age: u32,
}

/// Chart data for one sampled group: who was picked, their decades, and a point each
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleChart {
    pub people: Vec<PersonRecord>,
    pub buckets: Vec<AgeBucket>,
    pub points: Vec<SamplePoint>,
}

impl SampleChart {
    pub fn build(roster: &Roster, indices: &[usize]) -> Option<SampleChart> {
        let people = roster.select(indices);
        let ages: Vec<u32> = people.iter().map(|p| p.age).collect();
        let buckets = decade_histogram(&ages)?;
        let points = people
            .iter()
            .map(|p| SamplePoint {
                decade: decade_label(p.age),
                region: p.region.clone(),
                sex: p.sex,
                name: p.name.clone(),
                age: p.age,
            })
            .collect();
        Some(SampleChart { people, buckets, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::assignment::{AssignmentState, Bucket};
    use crate::roster::person;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn undrawn_sample_stays_inside_the_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = AssignmentState::new(9);
        for bucket in [Bucket::Boom, Bucket::Pam, Bucket::Boom] {
            state.draw(&mut rng);
            state.assign(bucket);
        }
        let pool_before = state.unassigned().to_vec();

        for _ in 0..20 {
            let picked = sample_indices(state.unassigned(), 5, &mut rng).unwrap();
            let unique: HashSet<usize> = picked.iter().copied().collect();
            assert_eq!(unique.len(), 5);
            assert!(picked.iter().all(|i| pool_before.contains(i)));
        }
        assert_eq!(state.unassigned(), pool_before.as_slice());
    }

    #[test]
    fn too_small_population_is_no_data() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_indices(&[0, 1, 2, 3], 5, &mut rng), None);
        assert_eq!(sample_indices(&[], 5, &mut rng), None);
        assert_eq!(sample_indices(&[0, 1, 2, 3, 4], 5, &mut rng).map(|s| s.len()), Some(5));
    }

    #[test]
    fn chart_labels_each_point_with_its_decade() {
        let roster = Roster::new(vec![
            person("Noa", Sex::Female, 22, "Center"),
            person("Yossi", Sex::Male, 58, "South"),
        ]);
        let chart = SampleChart::build(&roster, &[1, 0]).unwrap();
        assert_eq!(chart.people[0].name, "Yossi");
        assert_eq!(chart.points[0].decade, "50-60");
        assert_eq!(chart.points[1].decade, "20-30");
        assert_eq!(chart.buckets.len(), 6);
        assert_eq!(SampleChart::build(&roster, &[]), None);
    }
}
