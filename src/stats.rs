use crate::models::{MoodCode, MoodStat, StatsResponse};
use crate::tracker::MoodMap;

pub fn build_stats(moods: &MoodMap) -> StatsResponse {
    let mut counts = [0u64; MoodCode::ALL.len()];
    for code in moods.values() {
        if let Some(slot) = MoodCode::ALL.iter().position(|candidate| candidate == code) {
            counts[slot] = counts[slot].saturating_add(1);
        }
    }
    let total: u64 = counts.iter().sum();

    let moods = MoodCode::ALL
        .iter()
        .zip(counts)
        .map(|(&code, count)| MoodStat {
            code,
            label: code.label(),
            color: code.color(),
            count,
            percent: percent_of(count, total),
        })
        .collect();

    StatsResponse { total, moods }
}

/// Share of `total`, one decimal place. Zero when nothing is set.
fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn stat(stats: &StatsResponse, code: MoodCode) -> &MoodStat {
        stats
            .moods
            .iter()
            .find(|entry| entry.code == code)
            .expect("missing mood")
    }

    #[test]
    fn empty_map_reports_zero_everywhere() {
        let stats = build_stats(&MoodMap::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.moods.len(), 3);
        assert!(stats.moods.iter().all(|m| m.count == 0 && m.percent == 0.0));
    }

    #[test]
    fn single_day_is_full_share() {
        let mut moods = MoodMap::new();
        moods.insert(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), MoodCode::A);

        let stats = build_stats(&moods);
        assert_eq!(stats.total, 1);
        assert_eq!(stat(&stats, MoodCode::A).count, 1);
        assert_eq!(stat(&stats, MoodCode::A).percent, 100.0);
        assert_eq!(stat(&stats, MoodCode::C).percent, 0.0);
        assert_eq!(stat(&stats, MoodCode::F).percent, 0.0);
    }

    #[test]
    fn counts_sum_to_total_and_percentages_to_hundred() {
        let mut moods = MoodMap::new();
        let pattern = [MoodCode::A, MoodCode::C, MoodCode::F, MoodCode::A, MoodCode::A, MoodCode::C, MoodCode::F];
        for (offset, code) in pattern.iter().cycle().take(100).enumerate() {
            moods.insert(start() + Duration::days(offset as i64), *code);
        }

        let stats = build_stats(&moods);
        let count_sum: u64 = stats.moods.iter().map(|m| m.count).sum();
        let percent_sum: f64 = stats.moods.iter().map(|m| m.percent).sum();
        assert_eq!(count_sum, 100);
        assert_eq!(stats.total, 100);
        assert!((percent_sum - 100.0).abs() <= 0.1 + f64::EPSILON);
    }

    #[test]
    fn thirds_round_to_one_decimal() {
        let mut moods = MoodMap::new();
        for (offset, code) in MoodCode::ALL.iter().enumerate() {
            moods.insert(start() + Duration::days(offset as i64), *code);
        }

        let stats = build_stats(&moods);
        assert!(stats.moods.iter().all(|m| m.percent == 33.3));
    }
}
