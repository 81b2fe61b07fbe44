use std::sync::LazyLock;

use serde::Serialize;

/// One World Cup final: the year it was played, who won and who lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldCupRecord {
    pub year: u16,
    pub winner: &'static str,
    pub runner_up: &'static str,
}

const fn record(year: u16, winner: &'static str, runner_up: &'static str) -> WorldCupRecord {
    WorldCupRecord {
        year,
        winner,
        runner_up,
    }
}

/// Every final played, in tournament order.
pub static RECORDS: [WorldCupRecord; 22] = [
    record(1930, "Uruguay", "Argentina"),
    record(1934, "Italy", "Czechoslovakia"),
    record(1938, "Italy", "Hungary"),
    record(1950, "Uruguay", "Brazil"),
    record(1954, "Germany", "Hungary"),
    record(1958, "Brazil", "Sweden"),
    record(1962, "Brazil", "Czechoslovakia"),
    record(1966, "England", "Germany"),
    record(1970, "Brazil", "Italy"),
    record(1974, "Germany", "Netherlands"),
    record(1978, "Argentina", "Netherlands"),
    record(1982, "Italy", "Germany"),
    record(1986, "Argentina", "Germany"),
    record(1990, "Germany", "Argentina"),
    record(1994, "Brazil", "Italy"),
    record(1998, "France", "Brazil"),
    record(2002, "Brazil", "Germany"),
    record(2006, "Italy", "France"),
    record(2010, "Spain", "Netherlands"),
    record(2014, "Germany", "Argentina"),
    record(2018, "France", "Croatia"),
    record(2022, "Argentina", "France"),
];

/// Year shown when nothing else was asked for.
pub const DEFAULT_YEAR: u16 = 2022;

/// Number of titles a country holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinCount {
    pub country: &'static str,
    pub wins: u32,
}

/// The static table together with its aggregation, built once per process.
pub struct Tournaments {
    records: &'static [WorldCupRecord],
    win_counts: Vec<WinCount>,
}

impl Tournaments {
    pub fn new(records: &'static [WorldCupRecord]) -> Self {
        Self {
            records,
            win_counts: count_wins(records),
        }
    }

    pub fn records(&self) -> &[WorldCupRecord] {
        self.records
    }

    pub fn win_counts(&self) -> &[WinCount] {
        &self.win_counts
    }

    /// Tournament years in table order (the year selector's options)
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.records.iter().map(|r| r.year)
    }
}

/// Process-wide table, initialised on first use and never mutated.
pub static TOURNAMENTS: LazyLock<Tournaments> = LazyLock::new(|| Tournaments::new(&RECORDS));

/// Find the final played in `year`.
pub fn find(records: &[WorldCupRecord], year: u16) -> Option<&WorldCupRecord> {
    records.iter().find(|r| r.year == year)
}

/// Count titles per winner, most titles first.
///
/// Countries with the same number of titles keep the order in which they first
/// appear in `records`, i.e. whoever won their first title earliest comes first.
pub fn count_wins(records: &[WorldCupRecord]) -> Vec<WinCount> {
    let mut counts: Vec<WinCount> = Vec::new();
    for r in records {
        match counts.iter_mut().find(|c| c.country == r.winner) {
            Some(c) => c.wins += 1,
            None => counts.push(WinCount {
                country: r.winner,
                wins: 1,
            }),
        }
    }
    // sort_by is stable, so first-occurrence order survives among ties
    counts.sort_by(|a, b| b.wins.cmp(&a.wins));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_years_are_unique() {
        let years: HashSet<u16> = RECORDS.iter().map(|r| r.year).collect();
        assert_eq!(years.len(), RECORDS.len());
        assert_eq!(RECORDS.first().map(|r| r.year), Some(1930));
        assert_eq!(RECORDS.last().map(|r| r.year), Some(2022));
    }

    #[test]
    fn test_wins_sum_to_record_count() {
        let total: u32 = TOURNAMENTS.win_counts().iter().map(|c| c.wins).sum();
        assert_eq!(total as usize, RECORDS.len());
    }

    #[test]
    fn test_win_counts_order_and_tie_break() {
        let counts: Vec<(&str, u32)> = TOURNAMENTS
            .win_counts()
            .iter()
            .map(|c| (c.country, c.wins))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Brazil", 5),
                ("Italy", 4),
                ("Germany", 4),
                ("Argentina", 3),
                ("Uruguay", 2),
                ("France", 2),
                ("England", 1),
                ("Spain", 1),
            ]
        );
    }

    #[test]
    fn test_each_winner_counted_once() {
        let counts = TOURNAMENTS.win_counts();
        for c in counts {
            let expected = RECORDS.iter().filter(|r| r.winner == c.country).count() as u32;
            assert_eq!(c.wins, expected, "{}", c.country);
            assert_eq!(counts.iter().filter(|o| o.country == c.country).count(), 1);
        }
    }

    #[test]
    fn test_find() {
        let final_2022 = find(&RECORDS, 2022).unwrap();
        assert_eq!(final_2022.winner, "Argentina");
        assert_eq!(final_2022.runner_up, "France");
        assert!(find(&RECORDS, 1935).is_none());
        assert!(find(&RECORDS, 1942).is_none());
    }

    #[test]
    fn test_count_wins_empty() {
        assert!(count_wins(&[]).is_empty());
    }
}
