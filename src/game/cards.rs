use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use super::sample::{sample_indices, SampleChart};
use super::stats::{
    age_by_south, decade_histogram, female_center_split, mean_age, median_age, region_counts,
    AgeBucket, AgeSouthPoint, RegionCount,
};
use crate::roster::Roster;

/// Roster-wide statistic cards, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKey {
    AvgAge,
    MedianAge,
    ScatterAges,
    DistNorthSouth,
    CorrFemaleCenter,
    CorrAgeSouth,
}

impl CardKey {
    pub const ALL: [CardKey; 6] = [
        CardKey::AvgAge,
        CardKey::MedianAge,
        CardKey::ScatterAges,
        CardKey::DistNorthSouth,
        CardKey::CorrFemaleCenter,
        CardKey::CorrAgeSouth,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CardKey::AvgAge => "avg_age",
            CardKey::MedianAge => "median_age",
            CardKey::ScatterAges => "scatter_ages",
            CardKey::DistNorthSouth => "dist_north_south",
            CardKey::CorrFemaleCenter => "corr_female_center",
            CardKey::CorrAgeSouth => "corr_age_south",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CardKey::AvgAge => "Average age",
            CardKey::MedianAge => "Median age",
            CardKey::ScatterAges => "Age spread",
            CardKey::DistNorthSouth => "North/South split",
            CardKey::CorrFemaleCenter => "Women vs. center",
            CardKey::CorrAgeSouth => "Age vs. south",
        }
    }

    /// Computes this card's chart over the whole roster
    pub fn chart(self, roster: &Roster) -> CardChart {
        let people = roster.people();
        if people.is_empty() {
            return CardChart::NoData;
        }
        match self {
            CardKey::AvgAge => mean_age(people).map_or(CardChart::NoData, |value| CardChart::Metric { value }),
            CardKey::MedianAge => median_age(people).map_or(CardChart::NoData, |value| CardChart::Metric { value }),
            CardKey::ScatterAges => decade_histogram(&roster.ages())
                .map_or(CardChart::NoData, |buckets| CardChart::DecadeLine { buckets }),
            CardKey::DistNorthSouth => CardChart::RegionBars { regions: region_counts(people) },
            CardKey::CorrFemaleCenter => {
                let (center, not_center) = female_center_split(people);
                CardChart::FemaleCenter { center, not_center }
            }
            CardKey::CorrAgeSouth => CardChart::AgeBySouth { points: age_by_south(people) },
        }
    }
}

impl FromStr for CardKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardKey::ALL
            .into_iter()
            .find(|card| card.key() == s)
            .ok_or_else(|| format!("unknown card '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardChart {
    Metric { value: f64 },
    DecadeLine { buckets: Vec<AgeBucket> },
    RegionBars { regions: Vec<RegionCount> },
    FemaleCenter { center: usize, not_center: usize },
    AgeBySouth { points: Vec<AgeSouthPoint> },
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKey {
    Sample5,
    Sample10,
    Sample5Undrawn,
}

impl SampleKey {
    pub const ALL: [SampleKey; 3] = [SampleKey::Sample5, SampleKey::Sample10, SampleKey::Sample5Undrawn];

    pub fn key(self) -> &'static str {
        match self {
            SampleKey::Sample5 => "sample5",
            SampleKey::Sample10 => "sample10",
            SampleKey::Sample5Undrawn => "sample5_undrawn",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SampleKey::Sample5 => "Sample of 5",
            SampleKey::Sample10 => "Sample of 10",
            SampleKey::Sample5Undrawn => "Sample of 5 (undrawn)",
        }
    }

    pub fn size(self) -> usize {
        match self {
            SampleKey::Sample5 | SampleKey::Sample5Undrawn => 5,
            SampleKey::Sample10 => 10,
        }
    }

    /// Whether the sample is restricted to people not yet drawn
    pub fn undrawn_only(self) -> bool {
        self == SampleKey::Sample5Undrawn
    }
}

impl FromStr for SampleKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleKey::ALL
            .into_iter()
            .find(|sample| sample.key() == s)
            .ok_or_else(|| format!("unknown sample card '{}'", s))
    }
}

/// Which cards have been flipped, and the group each revealed sample card drew.
/// A revealed sample holding `None` had too few people to sample from.
#[derive(Debug, Clone, Default)]
pub struct CardBoard {
    revealed: HashSet<CardKey>,
    samples: HashMap<SampleKey, Option<Vec<usize>>>,
}

impl CardBoard {
    pub fn reveal(&mut self, card: CardKey) {
        self.revealed.insert(card);
    }

    pub fn is_revealed(&self, card: CardKey) -> bool {
        self.revealed.contains(&card)
    }

    /// Draws a fresh group for `sample`, replacing any earlier one
    pub fn reveal_sample<R: Rng + ?Sized>(&mut self, sample: SampleKey, roster_len: usize, unassigned: &[usize], rng: &mut R) {
        let picked = if sample.undrawn_only() {
            sample_indices(unassigned, sample.size(), rng)
        } else {
            let everyone: Vec<usize> = (0..roster_len).collect();
            sample_indices(&everyone, sample.size(), rng)
        };
        self.samples.insert(sample, picked);
    }

    /// `None` while locked, `Some(None)` when revealed without enough people
    pub fn sample(&self, sample: SampleKey) -> Option<Option<&[usize]>> {
        self.samples.get(&sample).map(|picked| picked.as_deref())
    }

    pub fn clear(&mut self) {
        self.revealed.clear();
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{person, Sex};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(n: usize) -> Roster {
        Roster::new(
            (0..n)
                .map(|i| person(&format!("p{i}"), Sex::Female, 20 + i as u32, "Center"))
                .collect(),
        )
    }

    #[test]
    fn keys_round_trip_through_their_names() {
        for card in CardKey::ALL {
            assert_eq!(card.key().parse::<CardKey>(), Ok(card));
        }
        for sample in SampleKey::ALL {
            assert_eq!(sample.key().parse::<SampleKey>(), Ok(sample));
        }
        assert!("mode_age".parse::<CardKey>().is_err());
    }

    #[test]
    fn empty_roster_has_no_charts() {
        let empty = Roster::default();
        for card in CardKey::ALL {
            assert_eq!(card.chart(&empty), CardChart::NoData);
        }
    }

    #[test]
    fn average_card_is_a_metric() {
        assert_eq!(CardKey::AvgAge.chart(&roster(3)), CardChart::Metric { value: 21.0 });
        assert_eq!(
            CardKey::CorrFemaleCenter.chart(&roster(3)),
            CardChart::FemaleCenter { center: 3, not_center: 0 }
        );
    }

    #[test]
    fn reveal_is_sticky_until_cleared() {
        let mut board = CardBoard::default();
        assert!(!board.is_revealed(CardKey::MedianAge));
        board.reveal(CardKey::MedianAge);
        board.reveal(CardKey::MedianAge);
        assert!(board.is_revealed(CardKey::MedianAge));
        board.clear();
        assert!(!board.is_revealed(CardKey::MedianAge));
    }

    #[test]
    fn sample_cards_respect_population_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = CardBoard::default();
        assert_eq!(board.sample(SampleKey::Sample10), None);

        board.reveal_sample(SampleKey::Sample10, 7, &[0, 1, 2, 3, 4, 5, 6], &mut rng);
        assert_eq!(board.sample(SampleKey::Sample10), Some(None));

        board.reveal_sample(SampleKey::Sample5, 7, &[], &mut rng);
        assert_eq!(board.sample(SampleKey::Sample5).flatten().map(|s| s.len()), Some(5));

        board.reveal_sample(SampleKey::Sample5Undrawn, 7, &[1, 3, 5, 6], &mut rng);
        assert_eq!(board.sample(SampleKey::Sample5Undrawn), Some(None));

        let pool = [0, 2, 4, 5, 6];
        board.reveal_sample(SampleKey::Sample5Undrawn, 7, &pool, &mut rng);
        let picked = board.sample(SampleKey::Sample5Undrawn).flatten().unwrap();
        assert!(picked.iter().all(|i| pool.contains(i)));
    }
}
