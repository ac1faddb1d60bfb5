use hexapawn::{BoardState, Color, EpisodeId, LearningParams, LearningStore};

mod common;
use common::{approx_eq, board};

/// A short game: White advances the middle pawn, then two captures each way.
fn game_states() -> Vec<BoardState> {
    [
        "BBB...WWW_W",
        "BBB.W.W.W_B",
        ".BB.B.W.W_W",
        ".BB.W...W_B",
        ".B..B...W_W",
    ]
    .into_iter()
    .map(board)
    .collect()
}

fn record_game(store: &mut LearningStore, episode: EpisodeId, states: &[BoardState]) {
    let mut pointer = None;
    for state in states {
        pointer = Some(store.record_visited(episode, pointer.as_ref(), state));
    }
}

#[test]
fn resolve_unknown_state_returns_initial_weight() {
    let mut store = LearningStore::default();
    let resolution = store.resolve(EpisodeId::new(1), &BoardState::initial());

    assert!(approx_eq(resolution.weight, LearningParams::DEFAULT_INITIAL_WEIGHT));
    assert_eq!(resolution.matched, None);
    assert!(store.is_empty(), "resolve must not insert");
}

#[test]
fn resolve_known_state_reuses_weight_and_stamps_episode() {
    let mut store = LearningStore::default();
    let states = game_states();
    record_game(&mut store, EpisodeId::new(1), &states);
    store.reinforce(EpisodeId::new(1), Color::White);

    let target = &states[1];
    let resolution = store.resolve(EpisodeId::new(2), target);
    assert_eq!(resolution.matched, Some(target.key()));
    assert!(approx_eq(resolution.weight, 1.1));

    let record = store.get(&target.key()).unwrap();
    assert_eq!(record.generation(), EpisodeId::new(2));
    assert_eq!(store.touched_by(EpisodeId::new(2)).count(), 1);
}

#[test]
fn record_visited_deduplicates_structurally_equal_states() {
    let mut store = LearningStore::default();
    let states = game_states();
    record_game(&mut store, EpisodeId::new(1), &states);
    assert_eq!(store.len(), 5);

    record_game(&mut store, EpisodeId::new(2), &states);
    assert_eq!(store.len(), 5);
    assert!(store.iter().all(|r| r.generation() == EpisodeId::new(2)));

    let labels: Vec<String> = store.iter().map(|r| r.state().label()).collect();
    let expected: Vec<String> = states.iter().map(BoardState::label).collect();
    assert_eq!(labels, expected);
}

#[test]
fn white_win_rewards_white_moves_and_penalises_black_moves() {
    let mut store = LearningStore::default();
    let states = game_states();
    let episode = EpisodeId::new(1);
    record_game(&mut store, episode, &states);

    let summary = store.reinforce(episode, Color::White);
    assert_eq!(summary.rewarded, 2);
    assert_eq!(summary.penalized, 3);
    assert_eq!(summary.floored, 0);

    for record in store.iter() {
        match record.mover() {
            Color::White => assert!(approx_eq(record.weight(), 1.1), "{}", record.weight()),
            Color::Black => assert!(approx_eq(record.weight(), 0.9), "{}", record.weight()),
        }
    }

    // The state after White's opening move was moved into by White.
    let opening = store.get(&states[1].key()).unwrap();
    assert_eq!(opening.mover(), Color::White);
    assert!(opening.weight() > LearningParams::DEFAULT_INITIAL_WEIGHT);
}

#[test]
fn reinforcement_is_scoped_to_the_episode() {
    let mut store = LearningStore::default();
    let states = game_states();
    record_game(&mut store, EpisodeId::new(1), &states[..3]);
    record_game(&mut store, EpisodeId::new(2), &states[3..]);

    let summary = store.reinforce(EpisodeId::new(2), Color::Black);
    assert_eq!(summary.rewarded + summary.penalized, 2);

    for state in &states[..3] {
        assert!(approx_eq(store.weight_of(state), 1.0));
    }
    assert!(approx_eq(store.weight_of(&states[3]), 0.9));
    assert!(approx_eq(store.weight_of(&states[4]), 1.1));
}

#[test]
fn repeated_losses_drive_weights_to_the_floor() {
    let mut store = LearningStore::default();
    let losing: Vec<BoardState> = [
        "BBB...WWW_W",
        ".BBB..WWW_W",
        "B.B.B.WWW_W",
        "BB...BWWW_W",
        ".B.B.BWWW_W",
    ]
    .into_iter()
    .map(board)
    .collect();
    assert!(losing.iter().all(|s| s.mover() == Color::Black));

    let mut episode = EpisodeId::NONE;
    for _ in 0..20 {
        episode = episode.next();
        for state in &losing {
            store.record_visited(episode, None, state);
        }
        store.reinforce(episode, Color::White);
    }

    for state in &losing {
        assert_eq!(store.weight_of(state), LearningParams::DEFAULT_FLOOR);
    }

    let summary = store.reinforce(episode, Color::White);
    assert_eq!(summary.penalized, 5);
    assert_eq!(summary.floored, 5);
}

#[test]
fn repeated_wins_grow_without_bound() {
    let mut store = LearningStore::default();
    let state = board("BBB.W.W.W_B");
    let mut episode = EpisodeId::NONE;
    for _ in 0..100 {
        episode = episode.next();
        store.record_visited(episode, None, &state);
        store.reinforce(episode, Color::White);
    }
    assert!(approx_eq(store.weight_of(&state), 1.0 + 100.0 * 0.1));
}

#[test]
fn custom_params_are_honoured() {
    let params = LearningParams {
        initial_weight: 2.0,
        reward: 0.5,
        floor: 0.25,
    };
    let mut store = LearningStore::new(params).unwrap();
    let state = board("BBB...WWW_W");

    assert!(approx_eq(store.resolve(EpisodeId::new(1), &state).weight, 2.0));
    store.record_visited(EpisodeId::new(1), None, &state);
    store.reinforce(EpisodeId::new(1), Color::White);
    assert!(approx_eq(store.weight_of(&state), 1.5));

    for id in 2..10 {
        store.record_visited(EpisodeId::new(id), None, &state);
        store.reinforce(EpisodeId::new(id), Color::White);
    }
    assert_eq!(store.weight_of(&state), 0.25);
}

#[test]
fn latest_generation_and_reset() {
    let mut store = LearningStore::default();
    assert_eq!(store.latest_generation(), EpisodeId::NONE);

    record_game(&mut store, EpisodeId::new(7), &game_states());
    assert_eq!(store.latest_generation(), EpisodeId::new(7));

    store.reset();
    assert!(store.is_empty());
    assert!(!store.contains(&BoardState::initial()));
}
