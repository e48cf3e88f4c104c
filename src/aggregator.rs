//! Folds one match batch into its statistics record.

use tracing::warn;

use crate::config::ErrorStrategy;
use crate::error::Result;
use crate::event::{Actor, Event, KillEvent, UserinfoChange};
use crate::model::MatchStats;
use crate::segmenter::MatchBatch;

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregated {
    pub stats: MatchStats,
    /// Malformed lines dropped under `ErrorStrategy::Skip`
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    on_error: ErrorStrategy,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(ErrorStrategy::Abort)
    }
}

impl Aggregator {
    pub fn new(on_error: ErrorStrategy) -> Self {
        Self { on_error }
    }

    /// Process the batch lines in order. Batches share nothing, so this can run
    /// on any thread.
    pub fn aggregate(&self, batch: &MatchBatch) -> Result<Aggregated> {
        let mut stats = MatchStats::default();
        let mut skipped = 0;

        for line in &batch.lines {
            match Event::parse(line) {
                Ok(Some(Event::Kill(kill))) => record_kill(&mut stats, &kill),
                Ok(Some(Event::Userinfo(change))) => record_userinfo(&mut stats, change),
                Ok(None) => {}
                Err(err) if err.is_malformed_input() && self.on_error == ErrorStrategy::Skip => {
                    warn!(match_id = batch.id, "skipping {}", err);
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Aggregated { stats, skipped })
    }
}

/// Fail-fast aggregation of a single batch
pub fn aggregate(batch: &MatchBatch) -> Result<MatchStats> {
    Aggregator::default()
        .aggregate(batch)
        .map(|aggregated| aggregated.stats)
}

fn record_kill(stats: &mut MatchStats, kill: &KillEvent) {
    stats.total_kills += 1;
    *stats.kills_by_means.entry(kill.means).or_insert(0) += 1;

    // World kills and suicides only count against the victim
    if let Actor::Player(killer) = &kill.killer {
        if kill.victim != kill.killer {
            stats.player_mut(killer).kills += 1;
        }
    }
    // The world is never charged or registered
    if let Actor::Player(victim) = &kill.victim {
        stats.player_mut(victim).deaths += 1;
    }
}

fn record_userinfo(stats: &mut MatchStats, change: UserinfoChange) {
    if let Actor::Player(id) = &change.player {
        stats.player_mut(id).name = change.name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::LogLine;
    use crate::means::MeansOfDeath;
    use proptest::prelude::*;

    fn batch(lines: &[&str]) -> MatchBatch {
        MatchBatch {
            id: 0,
            lines: lines
                .iter()
                .enumerate()
                .map(|(idx, text)| LogLine::new(idx + 1, *text))
                .collect(),
        }
    }

    fn kill(killer: &str, victim: &str, means: &str) -> String {
        format!(" 1:00 Kill: {} {} 7: a killed b by {}", killer, victim, means)
    }

    fn userinfo(id: &str, name: &str) -> String {
        format!(r" 1:00 ClientUserinfoChanged: {} n\{}\t\0\model\sarge", id, name)
    }

    fn aggregate_lines(lines: &[String]) -> MatchStats {
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        aggregate(&batch(&refs)).unwrap()
    }

    #[test]
    fn test_world_kill_charges_victim_only() {
        let stats = aggregate_lines(&[kill("1022", "42", "MOD_FALLING")]);
        assert_eq!(stats.total_kills(), 1);
        assert_eq!(stats.player("42").unwrap().deaths, 1);
        assert_eq!(stats.player("42").unwrap().kills, 0);
        assert!(stats.player("1022").is_none());
        assert_eq!(stats.players().values().map(|p| p.kills).sum::<u64>(), 0);
        assert_eq!(stats.kills_by_means()[&MeansOfDeath::Falling], 1);
    }

    #[test]
    fn test_self_kill_charges_victim_only() {
        let stats = aggregate_lines(&[kill("7", "7", "MOD_ROCKET_SPLASH")]);
        let player = stats.player("7").unwrap();
        assert_eq!(player.deaths, 1);
        assert_eq!(player.kills, 0);
        assert_eq!(stats.total_kills(), 1);
    }

    #[test]
    fn test_ordinary_kill_credits_killer() {
        let stats = aggregate_lines(&[kill("3", "5", "MOD_RAILGUN")]);
        assert_eq!(stats.player("3").unwrap().kills, 1);
        assert_eq!(stats.player("3").unwrap().deaths, 0);
        assert_eq!(stats.player("5").unwrap().deaths, 1);
        assert_eq!(stats.player("5").unwrap().kills, 0);
    }

    #[test]
    fn test_last_userinfo_wins() {
        let stats = aggregate_lines(&[
            userinfo("42", "Ranger"),
            kill("42", "3", "MOD_SHOTGUN"),
            userinfo("42", "Sarge"),
        ]);
        let player = stats.player("42").unwrap();
        assert_eq!(player.name, "Sarge");
        assert_eq!(player.kills, 1);
    }

    #[test]
    fn test_userinfo_creates_player_with_zero_counts() {
        let stats = aggregate_lines(&[userinfo("9", "Ranger")]);
        assert_eq!(
            stats.player("9"),
            Some(&crate::model::PlayerStat {
                name: "Ranger".to_string(),
                kills: 0,
                deaths: 0,
            })
        );
        assert_eq!(stats.total_kills(), 0);
    }

    #[test]
    fn test_world_is_never_registered() {
        let stats = aggregate_lines(&[userinfo("1022", "<world>"), kill("2", "1022", "MOD_LAVA")]);
        assert!(stats.player("1022").is_none());
        assert_eq!(stats.players().len(), 1);
        assert_eq!(stats.total_kills(), 1);
    }

    #[test]
    fn test_kill_of_world_credits_killer() {
        let stats = aggregate_lines(&[kill("2", "1022", "MOD_ROCKET")]);
        let killer = stats.player("2").unwrap();
        assert_eq!(killer.kills, 1);
        assert_eq!(killer.deaths, 0);
        assert!(stats.player("1022").is_none());
        assert_eq!(stats.total_kills(), 1);
        assert_eq!(stats.kills_by_means()[&MeansOfDeath::Rocket], 1);
    }

    #[test]
    fn test_players_keyed_by_id_not_name() {
        let stats = aggregate_lines(&[
            userinfo("2", "Zeh"),
            kill("2", "3", "MOD_ROCKET"),
            userinfo("2", "Assasinu Credi"),
            kill("2", "3", "MOD_ROCKET"),
        ]);
        assert_eq!(stats.players().len(), 2);
        assert_eq!(stats.player("2").unwrap().kills, 2);
    }

    #[test]
    fn test_unknown_cause_is_counted() {
        let stats = aggregate_lines(&[kill("2", "3", "MOD_SPORK")]);
        assert_eq!(stats.kills_by_means()[&MeansOfDeath::Unknown], 1);
    }

    #[test]
    fn test_malformed_kill_aborts_by_default() {
        let err = aggregate(&batch(&[" 1:00 Kill: 2"])).unwrap_err();
        assert!(matches!(err, Error::MalformedKill { line: 1, .. }));
    }

    #[test]
    fn test_malformed_lines_skipped_on_request() {
        let good = kill("2", "3", "MOD_ROCKET");
        let aggregator = Aggregator::new(ErrorStrategy::Skip);
        let result = aggregator
            .aggregate(&batch(&[
                " 1:00 Kill: 2",
                good.as_str(),
                r" 1:00 ClientUserinfoChanged: 2 model\sarge",
            ]))
            .unwrap();
        assert_eq!(result.skipped, 2);
        assert_eq!(result.stats.total_kills(), 1);
        assert_eq!(
            result.stats.kills_by_means().values().sum::<u64>(),
            result.stats.total_kills()
        );
    }

    fn arb_kill_line() -> impl Strategy<Value = String> {
        let killer = prop_oneof![Just("1022".to_string()), (2u8..8).prop_map(|n| n.to_string())];
        let victim = (2u8..8).prop_map(|n| n.to_string());
        let means = prop::sample::select(MeansOfDeath::ALL.to_vec());
        (killer, victim, means).prop_map(|(k, v, m)| kill(&k, &v, m.as_str()))
    }

    fn arb_line() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => arb_kill_line(),
            1 => ((2u8..8), "[a-z]{1,8}").prop_map(|(id, name)| userinfo(&id.to_string(), &name)),
        ]
    }

    proptest! {
        #[test]
        fn prop_total_kills_matches_means(lines in prop::collection::vec(arb_line(), 0..64)) {
            let stats = aggregate_lines(&lines);
            prop_assert_eq!(stats.total_kills(), stats.kills_by_means().values().sum::<u64>());
        }

        #[test]
        fn prop_player_kills_never_exceed_total(lines in prop::collection::vec(arb_line(), 0..64)) {
            let stats = aggregate_lines(&lines);
            let credited: u64 = stats.players().values().map(|p| p.kills).sum();
            prop_assert!(credited <= stats.total_kills());

            let uncredited = lines.iter().filter_map(|line| {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                (tokens[1] == "Kill:").then(|| tokens[2] == "1022" || tokens[2] == tokens[3])
            }).filter(|&world_or_self| world_or_self).count() as u64;
            prop_assert_eq!(credited + uncredited, stats.total_kills());
        }

        #[test]
        fn prop_deaths_match_total_kills(lines in prop::collection::vec(arb_kill_line(), 0..64)) {
            let stats = aggregate_lines(&lines);
            let deaths: u64 = stats.players().values().map(|p| p.deaths).sum();
            prop_assert_eq!(deaths, stats.total_kills());
        }

        #[test]
        fn prop_aggregation_is_idempotent(lines in prop::collection::vec(arb_line(), 0..64)) {
            prop_assert_eq!(aggregate_lines(&lines), aggregate_lines(&lines));
        }
    }
}
