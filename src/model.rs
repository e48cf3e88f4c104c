//! Per-match statistics and the ordered collection handed to the serializer.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::event::PlayerId;
use crate::means::MeansOfDeath;

/// Running tally for one client within one match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStat {
    /// Last name seen in a ClientUserinfoChanged line; empty until then
    pub name: String,
    pub kills: u64,
    pub deaths: u64,
}

/// Statistics for a single match.
///
/// Built by the aggregator and read-only afterwards. `total_kills` always
/// equals the sum of `kills_by_means`, and is at least the sum of player kills
/// since world kills and suicides credit nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub(crate) total_kills: u64,
    pub(crate) players: IndexMap<PlayerId, PlayerStat>,
    pub(crate) kills_by_means: IndexMap<MeansOfDeath, u64>,
}

impl MatchStats {
    pub fn total_kills(&self) -> u64 {
        self.total_kills
    }

    /// Player registry in first-seen order
    pub fn players(&self) -> &IndexMap<PlayerId, PlayerStat> {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&PlayerStat> {
        self.players.get(&PlayerId::new(id))
    }

    /// Kill counts per cause in first-seen order
    pub fn kills_by_means(&self) -> &IndexMap<MeansOfDeath, u64> {
        &self.kills_by_means
    }

    /// Players ordered by kills, highest first; ties keep first-seen order
    pub fn ranked_players(&self) -> Vec<(&PlayerId, &PlayerStat)> {
        let mut ranked: Vec<_> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.1.kills.cmp(&a.1.kills));
        ranked
    }

    pub(crate) fn player_mut(&mut self, id: &PlayerId) -> &mut PlayerStat {
        self.players.entry(id.clone()).or_default()
    }
}

/// JSON shape of one match in the report
#[derive(Serialize)]
struct MatchReport<'a> {
    total_kills: u64,
    players: Vec<&'a str>,
    kills: IndexMap<&'a str, u64>,
    kills_by_means: IndexMap<MeansOfDeath, u64>,
}

impl<'a> From<&'a MatchStats> for MatchReport<'a> {
    fn from(stats: &'a MatchStats) -> Self {
        let ranked = stats.ranked_players();

        let mut kills: IndexMap<&str, u64> = IndexMap::with_capacity(ranked.len());
        for &(_, player) in &ranked {
            *kills.entry(player.name.as_str()).or_insert(0) += player.kills;
        }

        let mut by_means: Vec<(MeansOfDeath, u64)> = stats
            .kills_by_means
            .iter()
            .map(|(means, count)| (*means, *count))
            .collect();
        by_means.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Self {
            total_kills: stats.total_kills,
            players: ranked.iter().map(|&(_, p)| p.name.as_str()).collect(),
            kills,
            kills_by_means: by_means.into_iter().collect(),
        }
    }
}

impl Serialize for MatchStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatchReport::from(self).serialize(serializer)
    }
}

/// Finished matches in the order segmentation detected them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCollection {
    matches: Vec<MatchStats>,
}

impl MatchCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stats: MatchStats) {
        self.matches.push(stats);
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MatchStats> {
        self.matches.get(index)
    }

    /// `("game-1", stats)`, `("game-2", stats)`, ...
    pub fn iter(&self) -> impl Iterator<Item = (String, &MatchStats)> {
        self.matches
            .iter()
            .enumerate()
            .map(|(idx, stats)| (match_label(idx), stats))
    }
}

impl FromIterator<MatchStats> for MatchCollection {
    fn from_iter<I: IntoIterator<Item = MatchStats>>(iter: I) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}

/// Report label for the match at `index` (0-based)
pub fn match_label(index: usize) -> String {
    format!("game-{}", index + 1)
}

impl Serialize for MatchCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.matches.len()))?;
        for (label, stats) in self.iter() {
            map.serialize_entry(&label, stats)?;
        }
        map.end()
    }
}
