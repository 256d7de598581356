//! Computer opponents: minimax search with alpha-beta pruning, its static
//! evaluation, and a uniform random baseline.

mod agent;
mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{
    best_move, choose_move, Heuristic, Minimax, MinimaxAgent, Score, SearchResult, SearchStats,
    StreakHeuristic, INFINITY, LOSS_SCORE,
};
pub use random::RandomAgent;
