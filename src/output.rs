//! JSON report rendering and persistence, plus the plain-text match summary.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::MatchCollection;

/// Report path used when the caller does not choose one
pub const DEFAULT_OUTPUT_PATH: &str = "match_data.json";

/// Destination of the JSON report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// `-` selects stdout, anything else is a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Stdout => f.write_str("<stdout>"),
        }
    }
}

/// Render the collection as pretty JSON with two-space indentation
pub fn to_json_pretty(matches: &MatchCollection) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec_pretty(matches)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Render and persist the report. The document is fully rendered before the
/// destination is touched, so an encoding failure leaves no partial file.
pub fn write_report(matches: &MatchCollection, target: &OutputTarget) -> Result<()> {
    let json = to_json_pretty(matches)?;
    match target {
        OutputTarget::File(path) => fs::write(path, &json).map_err(|source| Error::Persist {
            path: path.clone(),
            source,
        }),
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&json)
                .and_then(|_| lock.flush())
                .map_err(|source| Error::Persist {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}

/// Per-match table: players ranked like the JSON report, with kills and deaths
pub fn write_summary<W: Write>(output: &mut W, matches: &MatchCollection) -> io::Result<()> {
    for (label, stats) in matches.iter() {
        writeln!(output, "{}: total kills {}", label, stats.total_kills())?;

        let ranked = stats.ranked_players();
        let width = ranked
            .iter()
            .map(|(_, p)| p.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("player".len());

        writeln!(output, "  {:<width$}  {:>5}  {:>6}", "player", "kills", "deaths")?;
        for (id, player) in ranked {
            let name = if player.name.is_empty() {
                format!("#{}", id)
            } else {
                player.name.clone()
            };
            writeln!(
                output,
                "  {:<width$}  {:>5}  {:>6}",
                name, player.kills, player.deaths
            )?;
        }
    }
    Ok(())
}
