use log::debug;

use crate::game::{Board, GameState, Piece};

use super::agent::Agent;

pub type Score = i32;

/// Unbounded alpha/beta seed.
pub const INFINITY: Score = Score::MAX;

/// Returned by the heuristic when the opponent already has four in a row.
pub const LOSS_SCORE: Score = -100_000;

const CENTER_WEIGHT: Score = 3;
const FOUR_WEIGHT: Score = 100;
const THREE_WEIGHT: Score = 5;
const TWO_WEIGHT: Score = 2;
const OPPONENT_THREE_WEIGHT: Score = 4;

/// Trait for evaluating a board position from a piece's perspective.
pub trait Heuristic {
    fn evaluate(&self, board: &Board, piece: Piece) -> Score;
}

/// Default heuristic: center occupancy plus weighted streak counts.
///
/// Deliberately lopsided: opponent fours only trigger the loss cutoff and
/// opponent twos are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakHeuristic;

impl Heuristic for StreakHeuristic {
    fn evaluate(&self, board: &Board, piece: Piece) -> Score {
        let opponent = piece.opponent();
        if board.count_streak(opponent, 4) > 0 {
            return LOSS_SCORE;
        }

        let weighted = |count: usize, weight: Score| count as Score * weight;
        weighted(board.center_count(piece), CENTER_WEIGHT)
            + weighted(board.count_streak(piece, 4), FOUR_WEIGHT)
            + weighted(board.count_streak(piece, 3), THREE_WEIGHT)
            + weighted(board.count_streak(piece, 2), TWO_WEIGHT)
            - weighted(board.count_streak(opponent, 3), OPPONENT_THREE_WEIGHT)
    }
}

/// Column picked by a search and its value from the computer's perspective.
/// `column` is `None` for decided, full, or depth-exhausted positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: Score,
}

/// Node and cutoff counters for one or more searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Depth-limited minimax with alpha-beta pruning. The computer (`Piece::Ai`)
/// maximizes, the human (`Piece::Player`) minimizes, and leaves are always
/// scored for the computer.
pub struct Minimax<H = StreakHeuristic> {
    heuristic: H,
    stats: SearchStats,
}

impl Minimax<StreakHeuristic> {
    pub fn new() -> Self {
        Self::with_heuristic(StreakHeuristic)
    }
}

impl Default for Minimax<StreakHeuristic> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Heuristic> Minimax<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        Minimax {
            heuristic,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `depth` plies below `board`. Children are tried in ascending
    /// column order and only a strictly better score replaces the current
    /// best, so the lowest optimal column wins ties.
    pub fn best_move(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;

        if depth == 0 || board.has_four_in_a_row() {
            return SearchResult {
                column: None,
                score: self.heuristic.evaluate(board, Piece::Ai),
            };
        }

        let mut columns = board.playable_columns().peekable();
        let Some(&seed) = columns.peek() else {
            return SearchResult {
                column: None,
                score: 0,
            };
        };

        let piece = if maximizing { Piece::Ai } else { Piece::Player };
        let mut best = SearchResult {
            column: Some(seed),
            score: if maximizing { -INFINITY } else { INFINITY },
        };

        for col in columns {
            let Ok(child) = board.apply_move(col, piece) else {
                continue;
            };
            let score = self
                .best_move(&child, depth - 1, alpha, beta, !maximizing)
                .score;

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        column: Some(col),
                        score,
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        column: Some(col),
                        score,
                    };
                }
                beta = beta.min(best.score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

/// Run a fresh search with the default heuristic.
pub fn best_move(
    board: &Board,
    depth: usize,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> SearchResult {
    Minimax::new().best_move(board, depth, alpha, beta, maximizing)
}

/// Pick a column for `acting_piece`. Returns `None` at depth 0, on decided or
/// full boards, and for `Piece::Empty`.
pub fn choose_move(board: &Board, depth: usize, acting_piece: Piece) -> Option<usize> {
    if acting_piece.is_empty() {
        return None;
    }
    let mut search = Minimax::new();
    let result = search.best_move(
        board,
        depth,
        -INFINITY,
        INFINITY,
        acting_piece == Piece::Ai,
    );
    let stats = search.stats();
    debug!(
        "{:?} at depth {}: column {:?} score {} ({} nodes, {} cutoffs)",
        acting_piece, depth, result.column, result.score, stats.nodes, stats.cutoffs
    );
    result.column
}

/// Agent that plays `piece` by searching `depth` plies.
pub struct MinimaxAgent {
    depth: usize,
    piece: Piece,
}

impl MinimaxAgent {
    pub fn new(depth: usize, piece: Piece) -> Self {
        MinimaxAgent { depth, piece }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        choose_move(state.board(), self.depth, self.piece)
            .or_else(|| state.legal_actions().first().copied())
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, COLS, ROWS};

    /// Plain minimax without pruning, used as a reference.
    fn full_minimax(board: &Board, depth: usize, maximizing: bool) -> SearchResult {
        let h = StreakHeuristic;
        if depth == 0 || board.has_four_in_a_row() {
            return SearchResult {
                column: None,
                score: h.evaluate(board, Piece::Ai),
            };
        }
        let columns: Vec<usize> = board.playable_columns().collect();
        if columns.is_empty() {
            return SearchResult {
                column: None,
                score: 0,
            };
        }
        let piece = if maximizing { Piece::Ai } else { Piece::Player };
        let mut best = SearchResult {
            column: Some(columns[0]),
            score: if maximizing { -INFINITY } else { INFINITY },
        };
        for col in columns {
            let child = board.apply_move(col, piece).unwrap();
            let score = full_minimax(&child, depth - 1, !maximizing).score;
            let better = if maximizing {
                score > best.score
            } else {
                score < best.score
            };
            if better {
                best = SearchResult {
                    column: Some(col),
                    score,
                };
            }
        }
        best
    }

    /// Positions reached by seeded random play, stopping before the game ends.
    fn random_positions(count: usize, max_moves: usize) -> Vec<Board> {
        let mut positions = Vec::new();
        for seed in 0..count as u64 {
            let mut agent = RandomAgent::with_seed(seed);
            let mut state = GameState::new(Piece::Player);
            let moves = seed as usize % (max_moves + 1);
            for _ in 0..moves {
                let Some(col) = agent.select_action(&state) else {
                    break;
                };
                let next = state.apply_move(col).unwrap();
                if next.is_terminal() {
                    break;
                }
                state = next;
            }
            positions.push(*state.board());
        }
        positions
    }

    // --- Heuristic tests ---

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        let h = StreakHeuristic;
        assert_eq!(h.evaluate(&board, Piece::Ai), 0);
        assert_eq!(h.evaluate(&board, Piece::Player), 0);
    }

    #[test]
    fn heuristic_exact_weights() {
        let board = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            .......
            oooo...
            ",
        );
        // center 1*3 + fours 1*100 + threes 2*5 + twos 3*2
        assert_eq!(StreakHeuristic.evaluate(&board, Piece::Ai), 119);
        // The opponent's four is a hard cutoff
        assert_eq!(StreakHeuristic.evaluate(&board, Piece::Player), LOSS_SCORE);
    }

    #[test]
    fn heuristic_penalizes_opponent_threes_only() {
        let twos = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            .......
            .....xx
            ",
        );
        assert_eq!(StreakHeuristic.evaluate(&twos, Piece::Ai), 0);

        let threes = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            .......
            ....xxx
            ",
        );
        assert_eq!(StreakHeuristic.evaluate(&threes, Piece::Ai), -4);
    }

    #[test]
    fn heuristic_ignores_highlight() {
        let mut board = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            .......
            oooo...
            ",
        );
        let before = StreakHeuristic.evaluate(&board, Piece::Ai);
        board.highlight([(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(StreakHeuristic.evaluate(&board, Piece::Ai), before);
    }

    // --- Search tests ---

    #[test]
    fn empty_board_depth_one_takes_center() {
        let board = Board::new();
        let result = best_move(&board, 1, -INFINITY, INFINITY, true);
        assert_eq!(result, SearchResult { column: Some(3), score: 3 });
        assert_eq!(choose_move(&board, 1, Piece::Ai), Some(3));
    }

    #[test]
    fn minimizing_ties_keep_first_column() {
        // Every human reply scores 0 for the computer, so column 0 stands.
        let result = best_move(&Board::new(), 1, -INFINITY, INFINITY, false);
        assert_eq!(result, SearchResult { column: Some(0), score: 0 });
    }

    #[test]
    fn depth_zero_returns_no_column() {
        let mut board = Board::new();
        board.drop_piece(3, Piece::Ai).unwrap();
        let result = best_move(&board, 0, -INFINITY, INFINITY, true);
        assert_eq!(result.column, None);
        assert_eq!(result.score, 3);
        assert_eq!(choose_move(&board, 0, Piece::Ai), None);
    }

    #[test]
    fn completes_four_in_a_row() {
        let board = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            xxx....
            ooo....
            ",
        );
        for depth in 1..=3 {
            assert_eq!(choose_move(&board, depth, Piece::Ai), Some(3), "depth {depth}");
        }
        let result = best_move(&board, 1, -INFINITY, INFINITY, true);
        assert!(result.score >= FOUR_WEIGHT);
    }

    #[test]
    fn blocks_opponent_four() {
        let board = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            oo.....
            xxx....
            ",
        );
        assert_eq!(choose_move(&board, 2, Piece::Ai), Some(3));
    }

    #[test]
    fn decided_board_returns_static_value() {
        let board = Board::from_layout(
            "
            .......
            .......
            .......
            .......
            .......
            xxxx...
            ",
        );
        let result = best_move(&board, 4, -INFINITY, INFINITY, true);
        assert_eq!(result, SearchResult { column: None, score: LOSS_SCORE });
    }

    #[test]
    fn full_board_returns_zero() {
        let board = Board::from_layout(
            "
            ooxxoox
            xxooxxo
            ooxxoox
            xxooxxo
            ooxxoox
            xxooxxo
            ",
        );
        let result = best_move(&board, 3, -INFINITY, INFINITY, true);
        assert_eq!(result, SearchResult { column: None, score: 0 });
        assert_eq!(choose_move(&board, 3, Piece::Player), None);
    }

    #[test]
    fn never_chooses_a_full_column() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let piece = if i % 2 == 0 { Piece::Player } else { Piece::Ai };
            board.drop_piece(3, piece).unwrap();
        }
        for depth in 1..=3 {
            let col = choose_move(&board, depth, Piece::Ai).unwrap();
            assert!(col < COLS && col != 3);
        }

        for position in random_positions(30, 20) {
            for piece in [Piece::Ai, Piece::Player] {
                let col = choose_move(&position, 2, piece).unwrap();
                assert!(position.is_column_playable(col));
            }
        }
    }

    #[test]
    fn pruning_matches_full_minimax() {
        for position in random_positions(24, 16) {
            for depth in [2, 3, 4] {
                for maximizing in [true, false] {
                    let pruned = best_move(&position, depth, -INFINITY, INFINITY, maximizing);
                    let full = full_minimax(&position, depth, maximizing);
                    assert_eq!(pruned, full, "depth {depth} maximizing {maximizing}");
                }
            }
        }
    }

    #[test]
    fn pruning_cuts_nodes() {
        let mut search = Minimax::new();
        search.best_move(&Board::new(), 4, -INFINITY, INFINITY, true);
        let stats = search.stats();
        // A full depth-4 tree on an empty board has 1 + 7 + 49 + 343 + 2401 nodes
        assert!(stats.nodes < 2801, "visited {} nodes", stats.nodes);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn empty_piece_has_no_move() {
        assert_eq!(choose_move(&Board::new(), 2, Piece::Empty), None);
    }

    // --- Agent tests ---

    #[test]
    fn agent_selects_legal_action() {
        let mut agent = MinimaxAgent::new(3, Piece::Ai);
        let state = GameState::new(Piece::Ai);
        let action = agent.select_action(&state).unwrap();
        assert!(state.legal_actions().contains(&action));
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), 3);
    }

    #[test]
    fn agent_falls_back_at_depth_zero() {
        let mut agent = MinimaxAgent::new(0, Piece::Ai);
        let state = GameState::new(Piece::Ai);
        assert_eq!(agent.select_action(&state), Some(0));
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut ai = MinimaxAgent::new(3, Piece::Ai);
        let mut human = MinimaxAgent::new(3, Piece::Player);
        let mut state = GameState::new(Piece::Ai);

        while !state.is_terminal() {
            let action = match state.current_piece() {
                Piece::Ai => ai.select_action(&state),
                _ => human.select_action(&state),
            }
            .unwrap();
            state = state.apply_move(action).unwrap();
        }

        assert!(state.round() <= ROWS * COLS + 1);
        assert_ne!(state.outcome(), &GameOutcome::Ongoing);
    }

    #[test]
    fn beats_random_agent() {
        let games = 20;
        let mut wins = 0;

        for game in 0..games {
            let first = if game % 2 == 0 { Piece::Ai } else { Piece::Player };
            let mut minimax = MinimaxAgent::new(3, Piece::Ai);
            let mut random = RandomAgent::with_seed(game as u64);
            let mut state = GameState::new(first);

            while !state.is_terminal() {
                let action = match state.current_piece() {
                    Piece::Ai => minimax.select_action(&state),
                    _ => random.select_action(&state),
                }
                .unwrap();
                state = state.apply_move(action).unwrap();
            }

            if state.outcome().winner() == Some(Piece::Ai) {
                wins += 1;
            }
        }

        let win_rate = wins as f64 / games as f64;
        assert!(
            win_rate > 0.75,
            "Minimax should beat random >75% of the time, got {:.0}% ({wins}/{games})",
            win_rate * 100.0
        );
    }
}
