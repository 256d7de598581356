use crate::game::GameState;

/// Universal interface for move-selecting opponents.
pub trait Agent {
    /// Select a column given the current game state, or `None` when there
    /// is nothing legal to play.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
