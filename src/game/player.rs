/// Contents of a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    Player,
    Ai,
}

impl Piece {
    /// Get the opposing piece. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Empty => Piece::Empty,
            Piece::Player => Piece::Ai,
            Piece::Ai => Piece::Player,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// Board symbol: `x` for the human, `o` for the computer
    pub fn symbol(self) -> char {
        match self {
            Piece::Empty => ' ',
            Piece::Player => 'x',
            Piece::Ai => 'o',
        }
    }
}

/// How a participant picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer { depth: usize },
}

/// A named participant bound to one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub piece: Piece,
    pub kind: PlayerKind,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            piece: Piece::Player,
            kind: PlayerKind::Human,
        }
    }

    pub fn computer(depth: usize) -> Self {
        Player {
            name: "AI".to_string(),
            piece: Piece::Ai,
            kind: PlayerKind::Computer { depth },
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }
}

/// The human and the computer seated for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    pub human: Player,
    pub computer: Player,
}

impl Players {
    pub fn new(human_name: impl Into<String>, depth: usize) -> Self {
        Players {
            human: Player::human(human_name),
            computer: Player::computer(depth),
        }
    }

    /// The participant holding `piece`
    pub fn get(&self, piece: Piece) -> Option<&Player> {
        match piece {
            Piece::Player => Some(&self.human),
            Piece::Ai => Some(&self.computer),
            Piece::Empty => None,
        }
    }
}
