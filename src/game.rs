use crate::board::Board;
use crate::moves;
use crate::types::{
    GameState, Move, MoveKind, MoveOutcome, Player, Position, Rank, RejectionReason,
};

/// Where the turn state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Start of a turn. `jump_forced` is fixed when the turn begins.
    AwaitingMove { jump_forced: bool },
    /// Mid multi-jump: only this origin is accepted until the chain ends.
    ContinueJump { from: Position },
    /// Terminal; the game no longer accepts moves.
    Over { winner: Player },
}

/// The rule engine proper: board, side to move, and turn phase.
pub struct Game {
    board: Board,
    current_player: Player,
    phase: Phase,
}

impl Game {
    /// Standard setup, Red to move.
    pub fn new() -> Self {
        let board = Board::new();
        let jump_forced = !moves::all_jumps(&board, Player::Red).is_empty();
        Self {
            board,
            current_player: Player::Red,
            phase: Phase::AwaitingMove { jump_forced },
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Over { winner } => Some(winner),
            _ => None,
        }
    }

    /// Jumps available to the side to move. A non-empty result is what
    /// drives the driver's "jump mandatory" notice.
    pub fn legal_jumps(&self) -> Vec<Move> {
        match self.phase {
            Phase::AwaitingMove { .. } => moves::all_jumps(&self.board, self.current_player),
            Phase::ContinueJump { from } => moves::jumps_from(&self.board, from),
            Phase::Over { .. } => Vec::new(),
        }
    }

    /// Simple moves available to the side to move. Empty mid-chain: only
    /// further jumps may end an open multi-jump.
    pub fn legal_simple_moves(&self) -> Vec<Move> {
        match self.phase {
            Phase::AwaitingMove { .. } => moves::all_simple_moves(&self.board, self.current_player),
            _ => Vec::new(),
        }
    }

    /// Validates and, when legal, executes one candidate move.
    /// Rejection leaves the game untouched and the same player retries.
    pub fn submit_move(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<MoveOutcome, RejectionReason> {
        if matches!(self.phase, Phase::Over { .. }) {
            return Err(RejectionReason::GameOver);
        }

        let piece = self.board.get(from).ok_or(RejectionReason::NoPieceAtOrigin)?;
        if piece.owner != self.current_player {
            return Err(RejectionReason::NotYourPiece);
        }
        if let Phase::ContinueJump { from: required } = self.phase {
            if from != required {
                return Err(RejectionReason::MustContinueJumpingFromSamePiece);
            }
        }

        let mv = Move::new(from, to);
        let kind = if to.in_bounds() { mv.kind() } else { None };
        let kind = kind.ok_or(RejectionReason::NotDiagonalAdjacentOrJumpDistance)?;

        let jump_required = match self.phase {
            Phase::AwaitingMove { jump_forced } => jump_forced,
            // Mid-chain; `Over` was rejected above.
            _ => true,
        };
        match kind {
            MoveKind::Simple if jump_required => {
                return Err(RejectionReason::JumpMandatoryButSimpleAttempted);
            }
            MoveKind::Simple => moves::check_simple_move(&self.board, from, to)?,
            MoveKind::Jump => moves::check_jump(&self.board, from, to)?,
        }

        // Accepted. Move, capture, promote, and settle the turn as a unit.
        self.board.move_piece(from, to);
        let captured = mv.captured_square();
        if let Some(square) = captured {
            self.board.remove(square);
        }

        let promoted = piece.rank == Rank::Man && to.row == piece.owner.promotion_row();
        if promoted {
            self.board.promote(to);
        }

        if kind == MoveKind::Jump && !moves::jumps_from(&self.board, to).is_empty() {
            self.phase = Phase::ContinueJump { from: to };
            return Ok(MoveOutcome {
                captured,
                promoted,
                turn_continues: true,
            });
        }

        self.pass_turn();
        Ok(MoveOutcome {
            captured,
            promoted,
            turn_continues: false,
        })
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, black_count) = self.board.count();
        let (jump_forced, continue_from) = match self.phase {
            Phase::AwaitingMove { jump_forced } => (jump_forced, None),
            Phase::ContinueJump { from } => (true, Some(from)),
            Phase::Over { .. } => (false, None),
        };
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            winner: self.winner(),
            jump_forced,
            continue_from,
            red_count,
            black_count,
        }
    }

    /// Hands the turn over and runs the once-per-turn terminal check.
    fn pass_turn(&mut self) {
        let mover = self.current_player;
        let next = mover.opponent();
        self.current_player = next;

        let (red, black) = self.board.count();
        if red == 0 {
            self.phase = Phase::Over {
                winner: Player::Black,
            };
            return;
        }
        if black == 0 {
            self.phase = Phase::Over {
                winner: Player::Red,
            };
            return;
        }

        let jumps = moves::all_jumps(&self.board, next);
        if jumps.is_empty() && moves::all_simple_moves(&self.board, next).is_empty() {
            // The side to move is stuck, so the mover wins.
            self.phase = Phase::Over { winner: mover };
            return;
        }
        self.phase = Phase::AwaitingMove {
            jump_forced: !jumps.is_empty(),
        };
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        let jump_forced = !moves::all_jumps(&board, current_player).is_empty();
        self.board = board;
        self.current_player = current_player;
        self.phase = Phase::AwaitingMove { jump_forced };
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn man(owner: Player) -> Piece {
        Piece::man(owner)
    }

    fn king(owner: Player) -> Piece {
        Piece {
            owner,
            rank: Rank::King,
        }
    }

    fn game_with(board: Board, current_player: Player) -> Game {
        let mut game = Game::new();
        game.set_board_for_test(board, current_player);
        game
    }

    #[test]
    fn t01_new_game_matches_the_standard_setup() {
        let game = Game::new();
        let state = game.to_game_state();

        assert_eq!(state.current_player, Player::Red);
        assert_eq!(state.winner, None);
        assert!(!state.jump_forced);
        assert_eq!(state.continue_from, None);
        assert_eq!((state.red_count, state.black_count), (12, 12));
        // Men only at the start.
        assert!(state.board.iter().all(|&code| code != 3 && code != 4));
    }

    #[test]
    fn t02_rejection_leaves_the_game_untouched() {
        let mut game = Game::new();
        let before = game.to_game_state();

        assert_eq!(
            game.submit_move(pos(9, 9), pos(4, 4)),
            Err(RejectionReason::NoPieceAtOrigin)
        );
        assert_eq!(
            game.submit_move(pos(4, 1), pos(3, 2)),
            Err(RejectionReason::NoPieceAtOrigin)
        );
        assert_eq!(
            game.submit_move(pos(2, 1), pos(3, 2)),
            Err(RejectionReason::NotYourPiece)
        );
        assert_eq!(
            game.submit_move(pos(5, 0), pos(3, 0)),
            Err(RejectionReason::NotDiagonalAdjacentOrJumpDistance)
        );
        assert_eq!(
            game.submit_move(pos(6, 1), pos(5, 0)),
            Err(RejectionReason::DestinationOccupied)
        );

        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn t03_capture_removes_exactly_the_jumped_piece() {
        let mut board = Board::empty();
        board.place(pos(5, 2), man(Player::Red));
        board.place(pos(4, 3), man(Player::Black));
        // Bystanders that must stay put.
        board.place(pos(0, 1), man(Player::Black));
        board.place(pos(7, 0), man(Player::Red));
        let mut game = game_with(board, Player::Red);

        let outcome = game.submit_move(pos(5, 2), pos(3, 4)).unwrap();

        assert_eq!(outcome.captured, Some(pos(4, 3)));
        assert!(!outcome.promoted);
        assert!(!outcome.turn_continues);

        let mut expected = board;
        expected.remove(pos(5, 2));
        expected.remove(pos(4, 3));
        expected.place(pos(3, 4), man(Player::Red));
        assert_eq!(*game.board(), expected);
        assert_eq!(game.current_player(), Player::Black);
    }

    #[test]
    fn t04_simple_move_rejected_while_a_jump_exists() {
        let mut board = Board::empty();
        board.place(pos(5, 2), man(Player::Red));
        board.place(pos(4, 3), man(Player::Black));
        board.place(pos(6, 5), man(Player::Red));
        board.place(pos(0, 1), man(Player::Black));
        let mut game = game_with(board, Player::Red);

        // (6,5) -> (5,6) is a perfectly valid simple move on its own.
        assert_eq!(
            game.submit_move(pos(6, 5), pos(5, 6)),
            Err(RejectionReason::JumpMandatoryButSimpleAttempted)
        );
        // An illegal jump is rejected too, never reinterpreted.
        assert_eq!(
            game.submit_move(pos(6, 5), pos(4, 7)),
            Err(RejectionReason::JumpRequiresCapturablePiece)
        );
        // The forced jump goes through.
        assert!(game.submit_move(pos(5, 2), pos(3, 4)).is_ok());
    }

    #[test]
    fn t05_multi_jump_chains_and_pins_the_origin() {
        let mut board = Board::empty();
        board.place(pos(5, 2), man(Player::Red));
        board.place(pos(4, 3), man(Player::Black));
        board.place(pos(2, 5), man(Player::Black));
        board.place(pos(0, 1), man(Player::Black));
        board.place(pos(6, 7), man(Player::Red));
        let mut game = game_with(board, Player::Red);

        let outcome = game.submit_move(pos(5, 2), pos(3, 4)).unwrap();
        assert!(outcome.turn_continues);
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.to_game_state().continue_from, Some(pos(3, 4)));
        assert_eq!(
            game.legal_jumps(),
            vec![Move::new(pos(3, 4), pos(1, 6))]
        );
        assert!(game.legal_simple_moves().is_empty());

        // Any other origin is rejected while the chain is open.
        assert_eq!(
            game.submit_move(pos(6, 7), pos(5, 6)),
            Err(RejectionReason::MustContinueJumpingFromSamePiece)
        );
        // So is a simple move by the jumping piece.
        assert_eq!(
            game.submit_move(pos(3, 4), pos(2, 3)),
            Err(RejectionReason::JumpMandatoryButSimpleAttempted)
        );

        let outcome = game.submit_move(pos(3, 4), pos(1, 6)).unwrap();
        assert_eq!(outcome.captured, Some(pos(2, 5)));
        assert!(!outcome.turn_continues);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn t06_promotion_happens_exactly_once() {
        let mut board = Board::empty();
        board.place(pos(1, 2), man(Player::Red));
        board.place(pos(4, 3), man(Player::Black));
        let mut game = game_with(board, Player::Red);

        let outcome = game.submit_move(pos(1, 2), pos(0, 1)).unwrap();
        assert!(outcome.promoted);
        assert_eq!(game.board().get(pos(0, 1)), Some(king(Player::Red)));

        // Black replies; the new king may then step backward.
        game.submit_move(pos(4, 3), pos(5, 2)).unwrap();
        let outcome = game.submit_move(pos(0, 1), pos(1, 2)).unwrap();
        assert!(!outcome.promoted);
        assert_eq!(game.board().get(pos(1, 2)), Some(king(Player::Red)));
    }

    #[test]
    fn a_man_promoted_mid_jump_continues_as_a_king() {
        let mut board = Board::empty();
        board.place(pos(2, 1), man(Player::Red));
        board.place(pos(1, 2), man(Player::Black));
        board.place(pos(1, 4), man(Player::Black));
        let mut game = game_with(board, Player::Red);

        // Jump onto the back rank: the man promotes, and the fresh king
        // still has a capture available backward, so the chain stays open.
        let outcome = game.submit_move(pos(2, 1), pos(0, 3)).unwrap();
        assert_eq!(outcome.captured, Some(pos(1, 2)));
        assert!(outcome.promoted);
        assert!(outcome.turn_continues);

        let outcome = game.submit_move(pos(0, 3), pos(2, 5)).unwrap();
        assert_eq!(outcome.captured, Some(pos(1, 4)));
        assert!(!outcome.promoted);
        assert!(!outcome.turn_continues);
        assert_eq!(game.winner(), Some(Player::Red));
    }

    #[test]
    fn t07_capturing_the_last_piece_wins() {
        let mut board = Board::empty();
        board.place(pos(5, 2), man(Player::Red));
        board.place(pos(4, 3), man(Player::Black));
        let mut game = game_with(board, Player::Red);

        game.submit_move(pos(5, 2), pos(3, 4)).unwrap();

        assert_eq!(game.winner(), Some(Player::Red));
        // Terminal state is frozen afterwards.
        assert_eq!(
            game.submit_move(pos(3, 4), pos(2, 5)),
            Err(RejectionReason::GameOver)
        );
        assert!(game.legal_jumps().is_empty());
        assert!(game.legal_simple_moves().is_empty());
    }

    #[test]
    fn t08_player_with_no_moves_loses() {
        // Black's only man sits on (5,0) with both its forward step and its
        // forward jump blocked by Red, so after Red's quiet move Black is
        // stuck and loses.
        let mut board = Board::empty();
        board.place(pos(5, 0), man(Player::Black));
        board.place(pos(6, 1), man(Player::Red));
        board.place(pos(7, 2), man(Player::Red));
        board.place(pos(3, 6), man(Player::Red));
        let mut game = game_with(board, Player::Red);

        game.submit_move(pos(3, 6), pos(2, 7)).unwrap();

        assert_eq!(game.winner(), Some(Player::Red));
    }

    #[test]
    fn t09_opening_sequence_plays_out_as_expected() {
        let mut game = Game::new();

        let outcome = game.submit_move(pos(5, 0), pos(4, 1)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome {
                captured: None,
                promoted: false,
                turn_continues: false,
            }
        );
        assert_eq!(game.current_player(), Player::Black);

        game.submit_move(pos(2, 5), pos(3, 4)).unwrap();
        assert_eq!(game.current_player(), Player::Red);

        // Neither side has a capture in this position.
        assert!(game.legal_jumps().is_empty());
        assert!(moves::all_jumps(game.board(), Player::Black).is_empty());
        assert!(!game.to_game_state().jump_forced);
        assert_eq!(game.winner(), None);
    }
}
