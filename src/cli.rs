use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::handicap::{EventId, PlayerId, RankMode, RoundId};

#[derive(Parser, Debug)]
#[command(author, version, about = "fairway handicap engine")]
pub struct Cli {
    /// Optional JSON config overriding the handicap defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Rebuild the database from a JSON league snapshot
    Load {
        /// Path to the snapshot file
        path: PathBuf,
    },
    /// Print a player's handicap index
    Index {
        player: PlayerId,
        /// Only count rounds played before this date (YYYY-MM-DD)
        #[arg(long = "as-of")]
        as_of: Option<NaiveDate>,
    },
    /// Print a player's round-by-round handicap history
    Trend { player: PlayerId },
    /// Print ranked results for an event
    Results {
        event: EventId,
        #[arg(short, long, default_value_t = RankMode::Net)]
        mode: RankMode,
    },
    /// Replace the entered values of a recorded score
    Correct {
        score: RoundId,
        /// Front nine
        #[arg(long = "out")]
        out_score: Option<i32>,
        /// Back nine
        #[arg(long = "in")]
        in_score: Option<i32>,
        #[arg(long = "total")]
        total_score: Option<i32>,
    },
}
