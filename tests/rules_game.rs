use hive::hive::{Board, Phase, Piece, Rejection};
use hive::{Action, Cell, Game, GameController, GameState, Outcome, PieceKind, PlayerId, Verdict};
use serde_json::json;

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

/// Build a two-player position from a snapshot: `pieces` are stacked in
/// order, hands and turn counters are debited to match, and `to_move` is
/// the seat to act next.
fn position(pieces: &[(PlayerId, PieceKind, i32, i32)], to_move: usize) -> Game {
    let fresh = Game::new([P1, P2]).expect("two players");
    let mut snapshot = serde_json::to_value(&fresh).expect("serialize game");
    let mut board = Board::new();

    for &(owner, kind, x, y) in pieces {
        board.push(Cell::new(x, y), Piece::new(kind, owner));

        let seat = &mut snapshot["players"][(owner.0 - 1) as usize];
        let left = seat["hand"]["counts"][kind.index()].as_u64().expect("count");
        seat["hand"]["counts"][kind.index()] = json!(left - 1);
        let turns = seat["turns"].as_u64().expect("turns");
        seat["turns"] = json!(turns + 1);
    }

    snapshot["board"] = serde_json::to_value(&board).expect("serialize board");
    snapshot["current"] = json!(to_move);
    snapshot["move_count"] = json!(pieces.len());
    serde_json::from_value(snapshot).expect("valid snapshot")
}

fn play_all(game: &mut Game, actions: &[&str]) {
    for text in actions {
        let action: Action = text.parse().expect("valid notation");
        let player = game.current_player();
        let outcome = game.play(player, action);
        assert!(outcome.is_accepted(), "{} by {}: {:?}", text, player, outcome);
    }
}

#[test]
fn test_surrounded_queen_loses() {
    let mut game = position(
        &[
            (P1, PieceKind::Queen, 0, 0),
            (P1, PieceKind::Ant, 0, -1),
            (P1, PieceKind::Spider, 0, 1),
            (P2, PieceKind::Ant, -1, 0),
            (P2, PieceKind::Beetle, -1, -1),
            (P1, PieceKind::Grasshopper, -1, 1),
            (P2, PieceKind::Queen, -2, 0),
            (P2, PieceKind::Ant, 1, -1),
        ],
        1,
    );
    assert_eq!(game.verdict(), None);
    assert!(!game.is_terminal());

    // P2's ant slides into the last free cell around P1's queen
    let outcome = game.apply(P2, PieceKind::Ant, Some(Cell::new(1, -1)), Cell::new(1, 0));
    assert_eq!(outcome, Outcome::Moved);
    assert_eq!(game.verdict(), Some(Verdict::Decided { winner: Some(P2), loser: P1 }));
    assert!(game.is_terminal());
    assert_eq!(game.get_winner(), Some(P2));
    assert_eq!(game.phase(), Phase::Finished);

    assert!(game.get_possible_moves().is_empty());
    assert!(game.legal_moves(PieceKind::Beetle, Some(P1), None).is_empty());
    assert_eq!(game.pass(P1), Outcome::Rejected(Rejection::GameOver));
}

#[test]
fn test_single_surround_with_three_players_has_no_winner() {
    let mut game = Game::new([P1, P2, PlayerId(3)]).expect("three players");
    play_all(&mut game, &["Q(0,0)", "A(1,0)"]);

    // Keep P1's queen surrounded by P3 through a snapshot
    let mut snapshot = serde_json::to_value(&game).expect("serialize");
    let mut board = game.board().clone();
    let ring = [
        (0, -1, PieceKind::Ant),
        (0, 1, PieceKind::Ant),
        (-1, 0, PieceKind::Ant),
        (-1, -1, PieceKind::Grasshopper),
        (-1, 1, PieceKind::Grasshopper),
        (1, 1, PieceKind::Beetle),
    ];
    for (x, y, kind) in ring {
        board.push(Cell::new(x, y), Piece::new(kind, PlayerId(3)));
        let count = &mut snapshot["players"][2]["hand"]["counts"][kind.index()];
        *count = json!(count.as_u64().expect("count") - 1);
    }
    snapshot["board"] = serde_json::to_value(&board).expect("serialize board");
    let mut game: Game = serde_json::from_value(snapshot).expect("snapshot");

    // P3 climbs the beetle onto P2's ant; P1's queen stays surrounded
    let outcome = game.apply(PlayerId(3), PieceKind::Beetle, Some(Cell::new(1, 1)), Cell::new(1, 0));
    assert_eq!(outcome, Outcome::Moved);
    assert_eq!(game.verdict(), Some(Verdict::Decided { winner: None, loser: P1 }));
    assert_eq!(game.get_winner(), None);
}

#[test]
fn test_put_back_changes_nothing() {
    let mut game = Game::new([P1, P2]).expect("two players");
    play_all(&mut game, &["A(0,0)", "A(1,0)", "Q(-1,0)", "Q(2,0)"]);
    let before = game.clone();

    let outcome = game.apply(P1, PieceKind::Queen, Some(Cell::new(-1, 0)), Cell::new(-1, 0));
    assert_eq!(outcome, Outcome::Replaced);
    assert!(outcome.is_accepted());
    assert_eq!(game, before);
    assert_eq!(game.current_player(), P1);
}

#[test]
fn test_snapshot_round_trip() {
    let mut game = Game::new([P1, P2]).expect("two players");
    play_all(
        &mut game,
        &["B(0,0)", "A(1,0)", "Q(-1,0)", "Q(2,0)", "Q(-1,0)->(-1,-1)", "G(3,0)", "Q(-1,-1)->(0,-1)", "G(4,0)", "B(0,0)->(1,0)"],
    );
    assert_eq!(game.board().height(&Cell::new(1, 0)), 2);

    let json = serde_json::to_string(&game).expect("serialize");
    let restored: Game = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, game);
    assert_eq!(restored.move_count(), 9);
    assert_eq!(restored.current_player(), P2);
    assert_eq!(restored.hand(P2).map(|h| h.remaining(PieceKind::Grasshopper)), Some(1));
    assert_eq!(restored.board().all_at(&Cell::new(1, 0)).len(), 2);
    assert_eq!(restored.actions(P2), game.actions(P2));
}

#[test]
fn test_inconsistent_snapshots_are_refused() {
    let mut game = Game::new([P1, P2]).expect("two players");
    play_all(&mut game, &["Q(0,0)", "Q(1,0)"]);
    let good = serde_json::to_value(&game).expect("serialize");

    let mut bad_seat = good.clone();
    bad_seat["current"] = json!(5);
    let err = serde_json::from_value::<Game>(bad_seat).expect_err("seat out of range");
    assert!(err.to_string().contains("inconsistent snapshot"), "{}", err);

    // P1's queen is on the board and still in hand
    let mut extra_queen = good.clone();
    extra_queen["players"][0]["hand"]["counts"][PieceKind::Queen.index()] = json!(1);
    assert!(serde_json::from_value::<Game>(extra_queen).is_err());

    let mut overfull = good.clone();
    overfull["players"][1]["hand"]["counts"][PieceKind::Ant.index()] = json!(9);
    assert!(serde_json::from_value::<Game>(overfull).is_err());

    let mut empty = good.clone();
    empty["players"] = json!([]);
    empty["current"] = json!(0);
    assert!(serde_json::from_value::<Game>(empty).is_err());

    let mut stranger = good.clone();
    stranger["players"][1]["id"] = json!(7);
    assert!(serde_json::from_value::<Game>(stranger).is_err());

    let restored: Game = serde_json::from_value(good).expect("consistent snapshot");
    assert_eq!(restored, game);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut game = Game::new([P1, P2]).expect("two players");
    play_all(&mut game, &["A(0,0)", "A(1,0)"]);
    let before = game.clone();

    let attempts = [
        (Action::Move { kind: PieceKind::Ant, from: Cell::new(5, 5), to: Cell::new(0, -1) }, Rejection::EmptySource),
        (Action::Move { kind: PieceKind::Ant, from: Cell::new(1, 0), to: Cell::new(1, -1) }, Rejection::NotYourPiece),
        (Action::Move { kind: PieceKind::Beetle, from: Cell::ORIGIN, to: Cell::new(0, -1) }, Rejection::WrongPiece(PieceKind::Beetle)),
        (Action::Place { kind: PieceKind::Ant, to: Cell::new(7, 7) }, Rejection::IllegalDestination),
        (Action::Pass, Rejection::MovesAvailable),
    ];
    for (action, reason) in attempts {
        assert_eq!(game.play(P1, action), Outcome::Rejected(reason), "{}", action);
        assert_eq!(game, before);
    }

    assert_eq!(
        game.play(P2, Action::Place { kind: PieceKind::Ant, to: Cell::new(2, 0) }),
        Outcome::Rejected(Rejection::NotYourTurn)
    );
    assert_eq!(game, before);
}

#[test]
fn test_pass_when_stuck() {
    // P1's only piece is pinned in the middle and their hand is empty
    let mut game = position(
        &[(P2, PieceKind::Queen, -1, 0), (P1, PieceKind::Queen, 0, 0), (P2, PieceKind::Ant, 1, 0)],
        0,
    );
    let mut snapshot = serde_json::to_value(&game).expect("serialize");
    snapshot["players"][0]["hand"]["counts"] = json!([0, 0, 0, 0, 0, 0, 0]);
    game = serde_json::from_value(snapshot).expect("snapshot");

    assert_eq!(game.actions(P1), vec![Action::Pass]);
    assert!(!game.can_pick_up(P1, Cell::ORIGIN));
    assert_eq!(game.play(P1, Action::Pass), Outcome::Passed);
    assert_eq!(game.current_player(), P2);
    assert_eq!(game.pass(P2), Outcome::Rejected(Rejection::MovesAvailable));
}

#[test]
fn test_reset_for_rematch() {
    let mut controller = GameController::new(Game::new([P1, P2]).expect("two players"));
    for text in ["S(0,0)", "S(1,0)"] {
        let player = controller.game().current_player();
        let action = text.parse().expect("notation");
        assert!(controller.try_action(player, action).is_accepted());
    }
    assert_eq!(controller.move_count(), 2);

    controller.reset(true);
    let game = controller.game();
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.current_player(), P2);
    assert_eq!(game.players().iter().map(|p| p.id).collect::<Vec<_>>(), vec![P2, P1]);
    assert!(game.players().iter().all(|p| p.turns == 0 && p.hand.remaining(PieceKind::Spider) == 2));
    assert_eq!(controller.move_count(), 0);

    controller.reset(false);
    assert_eq!(controller.game().current_player(), P2);
}
