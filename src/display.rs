use crate::game::CardChart;
use crate::game::stats::AgeBucket;
use crate::game::view::{CardView, SampleCardView};
use crate::game::{Bucket, GameView};
use crate::roster::PersonRecord;

/// Formats a person as a one-line summary: name | age | sex | region
pub fn format_person(person: &PersonRecord) -> String {
    format!(
        "{} | age: {} | sex: {} | region: {}",
        person.name, person.age, person.sex, person.region
    )
}

fn bar(count: usize) -> String {
    "#".repeat(count)
}

fn format_buckets(buckets: &[AgeBucket]) -> Vec<String> {
    buckets
        .iter()
        .map(|b| format!("  {:>7} {:>3} {}", b.label(), b.count, bar(b.count)))
        .collect()
}

/// Renders a revealed card's chart as text lines
pub fn format_chart(chart: &CardChart) -> Vec<String> {
    match chart {
        CardChart::Metric { value } => vec![format!("  {:.1}", value)],
        CardChart::DecadeLine { buckets } => format_buckets(buckets),
        // Region names stay hidden, that is the point of the card
        CardChart::RegionBars { regions } => regions
            .iter()
            .enumerate()
            .map(|(i, r)| format!("  area {:>2} {:>3} {}", i + 1, r.count, bar(r.count)))
            .collect(),
        CardChart::FemaleCenter { center, not_center } => vec![
            format!("  center     {:>3} {}", center, bar(*center)),
            format!("  not center {:>3} {}", not_center, bar(*not_center)),
        ],
        CardChart::AgeBySouth { points } => {
            let mut south: Vec<u32> = points.iter().filter(|p| p.south).map(|p| p.age).collect();
            let mut other: Vec<u32> = points.iter().filter(|p| !p.south).map(|p| p.age).collect();
            south.sort_unstable();
            other.sort_unstable();
            vec![
                format!("  south:     {:?}", south),
                format!("  not south: {:?}", other),
            ]
        }
        CardChart::NoData => vec!["  No data to show.".to_string()],
    }
}

pub fn format_card(card: &CardView) -> Vec<String> {
    match &card.chart {
        Some(chart) if card.revealed => {
            let mut lines = vec![format!("[{}] {}", card.key.key(), card.title)];
            lines.extend(format_chart(chart));
            lines
        }
        _ => vec![format!("[{}] {} (locked)", card.key.key(), card.title)],
    }
}

pub fn format_sample(sample: &SampleCardView) -> Vec<String> {
    let header = format!("[{}] {}", sample.key.key(), sample.title);
    if !sample.revealed {
        return vec![format!("{} (locked)", header)];
    }
    let Some(chart) = &sample.chart else {
        return vec![header, "  No data to show.".to_string()];
    };

    let mut lines = vec![header];
    lines.extend(format_buckets(&chart.buckets));
    for point in &chart.points {
        lines.push(format!("  {} {} {} ({})", point.decade, point.region, point.sex, point.name));
    }
    lines
}

fn print_team(bucket: Bucket, members: &[PersonRecord]) {
    println!("\n=== {} ({}) ===", bucket, members.len());
    if members.is_empty() {
        println!("  [EMPTY]");
    }
    for person in members {
        println!("  {}", format_person(person));
    }
}

/// Prints both teams, the pending person and any notice
pub fn print_game(view: &GameView) {
    print_team(Bucket::Boom, &view.boom);
    print_team(Bucket::Pam, &view.pam);

    println!("\n{} of {} still in the pool", view.unassigned_count, view.roster_size);
    match &view.current {
        Some(person) => println!("Drawn: {}  -> boom / pam / undo", format_person(person)),
        None => println!("Nobody drawn. Type 'draw'."),
    }
    print_notice(view);
}

pub fn print_notice(view: &GameView) {
    if let Some(notice) = &view.notice {
        println!("! {}", notice);
    }
}

/// Prints every card, locked or not
pub fn print_cards(view: &GameView) {
    println!("\n=== Statistic cards ===");
    for card in &view.cards {
        for line in format_card(card) {
            println!("{}", line);
        }
    }
    println!("\n=== Sample cards ===");
    for sample in &view.samples {
        for line in format_sample(sample) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::stats::RegionCount;
    use crate::game::CardKey;
    use crate::roster::{person, Sex};

    #[test]
    fn person_line() {
        let p = person("Noa", Sex::Female, 22, "Center");
        assert_eq!(format_person(&p), "Noa | age: 22 | sex: female | region: Center");
    }

    #[test]
    fn region_bars_hide_names() {
        let chart = CardChart::RegionBars {
            regions: vec![RegionCount { region: "Secret".to_string(), count: 2 }],
        };
        let lines = format_chart(&chart);
        assert_eq!(lines, vec!["  area  1   2 ##".to_string()]);
    }

    #[test]
    fn locked_card_shows_title_only() {
        let card = CardView {
            key: CardKey::AvgAge,
            title: CardKey::AvgAge.title(),
            revealed: false,
            chart: None,
        };
        assert_eq!(format_card(&card), vec!["[avg_age] Average age (locked)".to_string()]);
    }

    #[test]
    fn metric_has_one_decimal() {
        assert_eq!(format_chart(&CardChart::Metric { value: 37.24 }), vec!["  37.2".to_string()]);
    }
}
