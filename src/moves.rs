use crate::board::Board;
use crate::types::{Move, MoveKind, Piece, Player, Position, RejectionReason};

/// The four diagonal step directions shared by simple moves and jumps.
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Diagnoses a one-square candidate. Keyed purely by the piece found at
/// `from`; whose turn it is belongs to the turn controller.
pub fn check_simple_move(
    board: &Board,
    from: Position,
    to: Position,
) -> Result<(), RejectionReason> {
    let piece = board.get(from).ok_or(RejectionReason::NoPieceAtOrigin)?;
    if !to.in_bounds() || Move::new(from, to).kind() != Some(MoveKind::Simple) {
        return Err(RejectionReason::NotDiagonalAdjacentOrJumpDistance);
    }
    if board.get(to).is_some() {
        return Err(RejectionReason::DestinationOccupied);
    }
    check_direction(piece, from, to)
}

/// Diagnoses a two-square capture candidate.
pub fn check_jump(board: &Board, from: Position, to: Position) -> Result<(), RejectionReason> {
    let piece = board.get(from).ok_or(RejectionReason::NoPieceAtOrigin)?;
    let mv = Move::new(from, to);
    if !to.in_bounds() || mv.kind() != Some(MoveKind::Jump) {
        return Err(RejectionReason::NotDiagonalAdjacentOrJumpDistance);
    }
    if board.get(to).is_some() {
        return Err(RejectionReason::DestinationOccupied);
    }
    check_direction(piece, from, to)?;

    let Some(over) = mv.captured_square() else {
        return Err(RejectionReason::NotDiagonalAdjacentOrJumpDistance);
    };
    match board.get(over) {
        Some(jumped) if jumped.owner != piece.owner => Ok(()),
        _ => Err(RejectionReason::JumpRequiresCapturablePiece),
    }
}

pub fn is_simple_move_legal(board: &Board, from: Position, to: Position) -> bool {
    check_simple_move(board, from, to).is_ok()
}

pub fn is_jump_legal(board: &Board, from: Position, to: Position) -> bool {
    check_jump(board, from, to).is_ok()
}

/// All legal jumps for the piece at `pos`, in no particular order.
pub fn jumps_from(board: &Board, pos: Position) -> Vec<Move> {
    let mut jumps = Vec::new();
    for (dr, dc) in DIAGONALS {
        if let Some(to) = pos.offset(dr * 2, dc * 2) {
            if is_jump_legal(board, pos, to) {
                jumps.push(Move::new(pos, to));
            }
        }
    }
    jumps
}

/// Every legal jump for `player` across the whole board.
pub fn all_jumps(board: &Board, player: Player) -> Vec<Move> {
    let mut jumps = Vec::new();
    for (pos, piece) in board.pieces() {
        if piece.owner == player {
            jumps.extend(jumps_from(board, pos));
        }
    }
    jumps
}

/// Every legal simple move for `player` across the whole board.
pub fn all_simple_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for (pos, piece) in board.pieces() {
        if piece.owner != player {
            continue;
        }
        for (dr, dc) in DIAGONALS {
            if let Some(to) = pos.offset(dr, dc) {
                if is_simple_move_legal(board, pos, to) {
                    moves.push(Move::new(pos, to));
                }
            }
        }
    }
    moves
}

fn check_direction(piece: Piece, from: Position, to: Position) -> Result<(), RejectionReason> {
    if piece.is_king() {
        return Ok(());
    }
    let dr = to.row as i16 - from.row as i16;
    if dr.signum() == piece.owner.forward() as i16 {
        Ok(())
    } else {
        Err(RejectionReason::WrongDirectionForMan)
    }
}
