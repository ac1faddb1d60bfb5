use std::collections::{HashSet, VecDeque};

use hexapawn::{
    BoardState, Color, Outcome, Piece, Position, TerminalReason,
    game::{Cell, SIZE},
};

mod common;
use common::{board, successor_labels};

fn pos(x: u8, y: u8) -> Position {
    Position::new(x, y).expect("test position on board")
}

#[test]
fn initial_position_has_three_straight_advances_for_white() {
    let initial = BoardState::initial();
    assert_eq!(initial.to_move(), Color::White);
    assert_eq!(initial.count(Color::White), 3);
    assert_eq!(initial.count(Color::Black), 3);

    let moves: Vec<_> = initial.legal_moves().collect();
    assert_eq!(moves.len(), 3);
    assert!(moves.iter().all(|m| !m.is_capture()));
    assert!(moves.iter().all(|m| m.from().x() == m.to().x()));

    assert_eq!(
        successor_labels(&initial),
        vec!["BBB..WWW._B", "BBB.W.W.W_B", "BBBW...WW_B"]
    );
}

#[test]
fn initial_position_with_black_to_move_advances_straight() {
    let state = board("BBB...WWW_B");
    assert_eq!(
        successor_labels(&state),
        vec![".BBB..WWW_W", "B.B.B.WWW_W", "BB...BWWW_W"]
    );
}

#[test]
fn diagonal_moves_require_an_opponent_to_capture() {
    // Black: corners may step straight or take the advanced white pawn; the
    // middle pawn is blocked straight ahead and has nothing to take.
    let state = board("BBB.W.W.W_B");
    let moves: Vec<_> = state.legal_moves().collect();
    assert_eq!(moves.len(), 4);

    let captures: Vec<_> = moves.iter().filter(|m| m.is_capture()).collect();
    assert_eq!(captures.len(), 2);
    for capture in &captures {
        assert_eq!(capture.to(), pos(1, 1));
        assert_eq!(
            capture.captured(),
            Some(Piece::new(Color::White, pos(1, 1)))
        );
    }
    assert!(moves.iter().all(|m| m.from() != pos(1, 0)));

    assert_eq!(
        successor_labels(&state),
        vec![".BB.B.W.W_W", ".BBBW.W.W_W", "BB..B.W.W_W", "BB..WBW.W_W"]
    );
}

#[test]
fn diagonal_onto_own_piece_is_illegal() {
    let state = board("BBB.W.W.W_W");
    let moves: Vec<_> = state.legal_moves().collect();
    assert_eq!(moves.len(), 4);

    for corner in [pos(0, 2), pos(2, 2)] {
        let targets: Vec<_> = moves
            .iter()
            .filter(|m| m.from() == corner)
            .map(|m| m.to())
            .collect();
        assert_eq!(targets, vec![pos(corner.x(), 1)]);
    }

    let middle: HashSet<_> = moves
        .iter()
        .filter(|m| m.from() == pos(1, 1))
        .map(|m| m.to())
        .collect();
    assert_eq!(middle, HashSet::from([pos(0, 0), pos(2, 0)]));
}

#[test]
fn capture_removes_the_taken_piece_and_flips_turn() {
    let state = board("BBB.W.W.W_B");
    let (mv, next) = state
        .successors()
        .find(|(mv, _)| mv.from() == pos(0, 0) && mv.is_capture())
        .expect("corner capture available");

    assert_eq!(mv.to(), pos(1, 1));
    assert_eq!(next.label(), ".BB.B.W.W_W");
    assert_eq!(next.to_move(), Color::White);
    assert_eq!(next.piece_count(), state.piece_count() - 1);
    assert_eq!(next.count(Color::White), 2);
}

#[test]
fn equality_ignores_piece_order() {
    let pieces = [
        Piece::new(Color::Black, pos(0, 0)),
        Piece::new(Color::White, pos(1, 1)),
        Piece::new(Color::Black, pos(2, 0)),
        Piece::new(Color::White, pos(2, 2)),
    ];
    let mut reversed = pieces;
    reversed.reverse();

    let a = BoardState::from_pieces(pieces, Color::Black).unwrap();
    let b = BoardState::from_pieces(reversed, Color::Black).unwrap();
    let c = BoardState::from_pieces(pieces, Color::White).unwrap();

    assert_eq!(a, a.clone());
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(a.key(), b.key());
    assert_ne!(a, c);

    let set: HashSet<BoardState> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&a));
}

#[test]
fn from_pieces_rejects_invalid_boards() {
    let overlapping = [
        Piece::new(Color::Black, pos(1, 1)),
        Piece::new(Color::White, pos(1, 1)),
    ];
    assert!(BoardState::from_pieces(overlapping, Color::White).is_err());

    let crowded = (0..SIZE)
        .map(|x| Piece::new(Color::White, pos(x, 2)))
        .chain(std::iter::once(Piece::new(Color::White, pos(0, 1))));
    assert!(BoardState::from_pieces(crowded, Color::White).is_err());
}

#[test]
fn white_on_row_zero_wins_before_move_generation() {
    let state = board("W.B.B...W_B");
    assert!(state.legal_moves().next().is_some());
    assert_eq!(state.winner_by_advance(), Some(Color::White));
    assert_eq!(
        state.terminal_status(),
        Some(Outcome::new(Color::White, TerminalReason::LastRankReached))
    );

    // Black is also stuck here; the advance check still decides the reason.
    let stuck = board("W....B..W_B");
    assert_eq!(stuck.legal_moves().count(), 0);
    assert_eq!(
        stuck.terminal_status(),
        Some(Outcome::new(Color::White, TerminalReason::LastRankReached))
    );
}

#[test]
fn black_on_row_two_wins() {
    let state = board("....W.B.._W");
    assert_eq!(state.winner_by_advance(), Some(Color::Black));
    assert_eq!(
        state.terminal_status().map(|o| o.reason),
        Some(TerminalReason::LastRankReached)
    );
}

#[test]
fn boxed_in_side_loses_with_no_moves_left() {
    let state = board("B..W....._W");
    assert_eq!(state.winner_by_advance(), None);
    assert_eq!(state.legal_moves().count(), 0);
    assert_eq!(
        state.terminal_status(),
        Some(Outcome::new(Color::Black, TerminalReason::NoMovesLeft))
    );
}

#[test]
fn grid_projection_is_row_major_from_row_zero() {
    let grid = BoardState::initial().grid();
    assert_eq!(grid.rows()[0], [Cell::Black; 3]);
    assert_eq!(grid.rows()[1], [Cell::Empty; 3]);
    assert_eq!(grid.rows()[2], [Cell::White; 3]);
    assert_eq!(grid.cell(pos(2, 0)), Cell::Black);
    assert_eq!(grid.to_string(), "B B B\n. . .\nW W W");
    assert_eq!(grid.indented(1).lines().next(), Some("    B B B"));
}

/// Walk every state reachable from the start and check each legal transition.
#[test]
fn every_reachable_transition_respects_the_rules() {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([BoardState::initial()]);

    while let Some(state) = queue.pop_front() {
        if !seen.insert(state.clone()) {
            continue;
        }
        assert!(state.piece_count() <= 6);
        if state.is_terminal() {
            continue;
        }

        for (mv, next) in state.successors() {
            assert_eq!(next.to_move(), state.to_move().opponent());
            assert!(next.piece_count() <= state.piece_count());
            assert!(state.piece_count() - next.piece_count() <= 1);

            let before: HashSet<_> = state.pieces().copied().collect();
            let after: HashSet<_> = next.pieces().copied().collect();
            let removed: Vec<_> = before.difference(&after).collect();
            let added: Vec<_> = after.difference(&before).collect();

            assert_eq!(added.len(), 1, "exactly one piece moves");
            assert_eq!(added[0].color, state.to_move());
            assert_eq!(*added[0], Piece::new(state.to_move(), mv.to()));

            match mv.captured() {
                Some(captured) => {
                    assert_eq!(removed.len(), 2);
                    assert!(removed.contains(&&captured));
                    assert_eq!(state.color_at(mv.to()), Some(state.to_move().opponent()));
                    assert_ne!(mv.from().x(), mv.to().x());
                }
                None => {
                    assert_eq!(removed.len(), 1);
                    assert_eq!(state.color_at(mv.to()), None);
                    assert_eq!(mv.from().x(), mv.to().x());
                }
            }
            assert!(removed.contains(&&mv.piece()));

            queue.push_back(next);
        }
    }

    assert!(seen.len() > 10);
}
