//! Handicap computation and ranking. Everything here is pure and infallible:
//! malformed rounds are excluded from aggregation rather than reported, so a
//! leaderboard always renders from partial data. That exclusion is policy.

pub mod differential;
pub mod history;
pub mod index;
pub mod net;
pub mod ranking;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use differential::{differential, round_differential};
pub use history::{current_index, index_as_of, reconstruct, settled_index};
pub use index::handicap_index;
pub use net::{net_for, project_net};
pub use ranking::rank_results;
pub use types::{
    CourseId, CourseRatings, EventId, IndexValue, PlayerId, RankMode, RankedResult, Round, RoundId,
    ScoreCard, TeeRating, TrendPoint,
};
