//! Line classification and field extraction for the two event kinds the
//! aggregator cares about: kills and ClientUserinfoChanged.

use std::fmt;

use crate::error::{Error, Result};
use crate::means::MeansOfDeath;

/// Marker for the start of a new game session
pub const BOUNDARY_MARKER: &str = "InitGame:";
/// Separator rows; always ignored, even when they carry other markers
pub const SEPARATOR_MARKER: &str = "---";
pub const KILL_MARKER: &str = "Kill";
pub const USERINFO_MARKER: &str = "ClientUserinfoChanged";
const USERINFO_PAYLOAD_PREFIX: &str = "ClientUserinfoChanged: ";
const NAME_START: &str = "n\\";
const NAME_END: &str = "\\t";

/// Client number the server uses for environmental deaths
pub const WORLD_ID: &str = "1022";

/// One input line together with its 1-based position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub number: usize,
    pub text: String,
}

impl LogLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Classification of a raw line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Boundary,
    Kill,
    IdentityChange { payload: Option<&'a str> },
    Irrelevant,
}

impl LineKind<'_> {
    /// Kill and identity lines are the only ones aggregation reads
    pub fn is_event(&self) -> bool {
        matches!(self, LineKind::Kill | LineKind::IdentityChange { .. })
    }
}

/// Decide what a line is. Precedence: separator, boundary, kill, identity change.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.contains(SEPARATOR_MARKER) {
        LineKind::Irrelevant
    } else if line.contains(BOUNDARY_MARKER) {
        LineKind::Boundary
    } else if line.contains(KILL_MARKER) {
        LineKind::Kill
    } else if line.contains(USERINFO_MARKER) {
        let payload = line
            .find(USERINFO_PAYLOAD_PREFIX)
            .map(|idx| &line[idx + USERINFO_PAYLOAD_PREFIX.len()..]);
        LineKind::IdentityChange { payload }
    } else {
        LineKind::Irrelevant
    }
}

/// Client number scoped to one match
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either side of a kill
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    World,
    Player(PlayerId),
}

impl Actor {
    pub fn from_id(id: &str) -> Self {
        if id == WORLD_ID {
            Actor::World
        } else {
            Actor::Player(PlayerId::new(id))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillEvent {
    pub killer: Actor,
    pub victim: Actor,
    pub means: MeansOfDeath,
}

impl KillEvent {
    /// Tokens 2 and 3 are killer and victim; the last token is the cause tag.
    ///
    /// `  20:54 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT`
    pub fn parse(line: &LogLine) -> Result<Self> {
        let mut tokens = line.text.split_whitespace();
        let (killer, victim) = match (tokens.nth(2), tokens.next()) {
            (Some(killer), Some(victim)) => (killer, victim),
            _ => {
                return Err(Error::MalformedKill {
                    line: line.number,
                    text: line.text.clone(),
                })
            }
        };
        let tag = tokens.last().unwrap_or(victim);

        Ok(Self {
            killer: Actor::from_id(killer),
            victim: Actor::from_id(victim),
            means: MeansOfDeath::from_tag(tag),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserinfoChange {
    pub player: Actor,
    pub name: String,
}

impl UserinfoChange {
    /// Decode `<id> n\<name>\t\...` where `n\` and `\t` are literal backslash pairs
    pub fn parse(line: &LogLine, payload: Option<&str>) -> Result<Self> {
        let malformed = |reason| Error::MalformedUserinfo {
            line: line.number,
            text: line.text.clone(),
            reason,
        };

        let payload = payload.ok_or_else(|| malformed("missing payload"))?;
        let id = payload
            .split_whitespace()
            .next()
            .ok_or_else(|| malformed("missing player id"))?;
        let name_start = payload
            .find(NAME_START)
            .map(|idx| idx + NAME_START.len())
            .ok_or_else(|| malformed("missing name key"))?;
        let name_len = payload[name_start..]
            .find(NAME_END)
            .ok_or_else(|| malformed("unterminated name"))?;

        Ok(Self {
            player: Actor::from_id(id),
            name: payload[name_start..name_start + name_len].to_string(),
        })
    }
}

/// A fully extracted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Kill(KillEvent),
    Userinfo(UserinfoChange),
}

impl Event {
    /// Classify and extract; `Ok(None)` for lines that carry no event
    pub fn parse(line: &LogLine) -> Result<Option<Self>> {
        match classify(&line.text) {
            LineKind::Kill => KillEvent::parse(line).map(|kill| Some(Event::Kill(kill))),
            LineKind::IdentityChange { payload } => {
                UserinfoChange::parse(line, payload).map(|change| Some(Event::Userinfo(change)))
            }
            LineKind::Boundary | LineKind::Irrelevant => Ok(None),
        }
    }
}
