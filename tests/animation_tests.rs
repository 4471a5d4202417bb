//! Animation integration tests.
//!
//! These tests drive the flight and shuffle tracks through whole actions and
//! check what the renderer would see along the way.

use solitaire_core::animation::ShufflePhase;
use solitaire_core::core::{CardId, GameState, PileId, Rank, SpreadTarget, Suit, TableConfig, Vec2};
use solitaire_core::invariants::{check_conservation, check_stable};
use solitaire_core::render::RenderFrame;
use solitaire_core::rules::PickUpOutcome;

/// Upper bound on ticks any single action may animate for.
const TICK_LIMIT: usize = 5_000;

fn identity_state(config: TableConfig) -> GameState {
    GameState::from_order(config, &CardId::all().collect::<Vec<_>>())
}

/// Tick the shuffle track until it empties, returning the tick count.
fn run_shuffle(state: &mut GameState) -> usize {
    for tick in 0..TICK_LIMIT {
        if !state.shuffle().is_active() {
            return tick;
        }
        state.advance_shuffle();
        assert_eq!(RenderFrame::capture(state, Vec2::ZERO).card_count(), 52);
    }
    panic!("shuffle did not finish within {} ticks", TICK_LIMIT);
}

// =============================================================================
// Flight Tests
// =============================================================================

/// A flight covers floor(distance / speed) ticks and then lands.
#[test]
fn test_flight_tick_count() {
    let mut piles: [Vec<(CardId, bool)>; 7] = Default::default();
    piles[0] = CardId::all().skip(1).map(|c| (c, true)).collect();
    piles[3] = vec![(CardId(0), true)];
    let mut state = GameState::from_piles(TableConfig::default(), piles);

    let from = state.layout().pile_slot(PileId(3), 0);
    let to = state.layout().foundation_slot(Suit(0));
    let expected = (from.distance(to) / 20.0).floor() as usize;

    state.recover(PileId(3));
    let mut ticks = 0;
    while state.flights().len() == 1 {
        state.advance_flights();
        ticks += 1;
    }
    assert_eq!(ticks, expected);
    assert_eq!(state.foundation().arrived(Suit(0)), Some(Rank::ACE));
    assert_eq!(check_stable(&state), Ok(()));
}

/// Two flights of the same suit: the foundation shows the higher rank once
/// both have landed, whichever lands first.
#[test]
fn test_out_of_order_landings() {
    let mut piles: [Vec<(CardId, bool)>; 7] = Default::default();
    // The two sits much closer to the foundation column than the ace
    piles[1] = vec![(CardId(0), true)];
    piles[6] = vec![(CardId(51), true), (CardId(1), true)];
    piles[0] = CardId::all()
        .filter(|c| ![0, 1, 51].contains(&c.0))
        .map(|c| (c, true))
        .collect();
    let mut state = GameState::from_piles(TableConfig::default(), piles);

    assert_eq!(state.recover(PileId(1)), Some(CardId(0)));
    assert_eq!(state.recover(PileId(6)), Some(CardId(1)));

    let mut shown = Vec::new();
    while !state.flights().is_empty() {
        state.advance_flights();
        shown.push(state.foundation().arrived(Suit(0)));
    }
    assert!(shown.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(state.foundation().arrived(Suit(0)), Some(Rank(1)));
}

// =============================================================================
// Shuffle Tests
// =============================================================================

/// Deal-again animates every tableau card and leaves the new layout in place.
#[test]
fn test_deal_again_shuffle_completes() {
    for target in [SpreadTarget::DealtSlot, SpreadTarget::PreviousSlot] {
        let mut state = identity_state(TableConfig::default().with_spread_target(target));
        assert!(state.deal_again());
        let dealt = state.tableau().clone();

        let ticks = run_shuffle(&mut state);
        assert!(ticks > 0);
        assert_eq!(state.tableau().pile(PileId(0)), dealt.pile(PileId(0)));
        assert_eq!(check_stable(&state), Ok(()), "{:?}", target);
    }
}

/// While the shuffle runs, presses on the table do nothing.
#[test]
fn test_input_suspended_during_shuffle() {
    let mut state = identity_state(TableConfig::default());
    state.deal_again();

    for _ in 0..5 {
        assert_eq!(state.pick_up(PileId(0), 0, Vec2::ZERO), PickUpOutcome::Ignored);
        assert!(!state.deal_again());
        assert!(!state.retry());
        state.advance_shuffle();
    }
    run_shuffle(&mut state);
    assert!(state.accepts_input());
}

/// Cards show their old faces on the way in and their new faces on the way out.
#[test]
fn test_shuffle_face_switch() {
    let mut state = identity_state(TableConfig::default());
    state.deal_again();

    while state.shuffle().is_converging() {
        for entry in state.shuffle().iter() {
            assert_eq!(
                state.shuffle().display_face_up(entry, state.tableau().is_face_up(entry.card)),
                entry.snapshot_face_up
            );
        }
        state.advance_shuffle();
    }

    let frame = RenderFrame::capture(&state, Vec2::ZERO);
    for drawn in &frame.shuffling {
        assert_eq!(drawn.face_up, state.tableau().is_face_up(drawn.card));
    }
    assert!(state.shuffle().iter().all(|c| c.phase == ShufflePhase::Spreading));
}

/// Every card meets at the staging point before any card spreads.
#[test]
fn test_cards_meet_at_staging_point() {
    let mut state = identity_state(TableConfig::default());
    state.deal_again();
    let staging = state.layout().staging_point();

    while state.shuffle().is_converging() {
        state.advance_shuffle();
    }
    assert!(state.shuffle().iter().all(|c| c.position == staging));
    assert_eq!(state.shuffle().staging_point(), staging);
}

/// Cards settle into the table as they retire.
#[test]
fn test_retired_cards_render_from_piles() {
    let mut state = identity_state(TableConfig::default());
    state.deal_again();

    let mut pile_cards = 0;
    while state.shuffle().is_active() {
        let retired = state.advance_shuffle();
        let frame = RenderFrame::capture(&state, Vec2::ZERO);
        let now = frame.piles.iter().map(Vec::len).sum::<usize>();
        assert_eq!(now, pile_cards + retired.len());
        pile_cards = now;
    }
    assert_eq!(pile_cards, 52);
}

/// Retry gathers foundation cards too, with either spread target.
#[test]
fn test_retry_shuffle_with_foundation_cards() {
    for target in [SpreadTarget::DealtSlot, SpreadTarget::PreviousSlot] {
        let mut piles: [Vec<(CardId, bool)>; 7] = Default::default();
        piles[2] = CardId::all()
            .filter(|c| c.rank().value() >= 2)
            .map(|c| (c, true))
            .collect();
        let config = TableConfig::default().with_spread_target(target);
        let mut state = GameState::from_piles(config, piles);
        assert_eq!(state.recovered_total(), 8);

        assert!(state.retry());
        assert_eq!(state.shuffle().len(), 52);
        assert_eq!(check_conservation(&state), Ok(()));

        run_shuffle(&mut state);
        assert_eq!(state.tableau().card_count(), 52);
        assert_eq!(check_stable(&state), Ok(()), "{:?}", target);
    }
}

/// Flights keep flying across a deal-again.
#[test]
fn test_flight_survives_deal_again() {
    let mut piles: [Vec<(CardId, bool)>; 7] = Default::default();
    piles[0] = CardId::all().skip(1).map(|c| (c, true)).collect();
    piles[5] = vec![(CardId(0), true)];
    let mut state = GameState::from_piles(TableConfig::default(), piles);

    state.recover(PileId(5));
    assert!(state.deal_again());
    assert_eq!(state.shuffle().len(), 51);

    for _ in 0..TICK_LIMIT {
        if state.is_stable() {
            break;
        }
        state.advance_shuffle();
        state.advance_flights();
        assert_eq!(check_conservation(&state), Ok(()));
    }
    assert_eq!(state.foundation().arrived(Suit(0)), Some(Rank::ACE));
    assert_eq!(check_stable(&state), Ok(()));
}
