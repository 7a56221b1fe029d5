//! Agent placement tests.
//!
//! These run moves against the JSON content fixture and check:
//! - Validation order and rejection reasons
//! - Leader capability hooks (discounts, occupied placement, payment draws)
//! - Commit side effects (costs, effects, destroy, agent bonuses)
//! - Decision discovery for optional steps

use imperium_engine::cards::{CardId, ContentDb, IntrigueId, LocationId};
use imperium_engine::core::{names, Faction, GameState, Phase, PlayerId, PlayerState, RulesConfig};
use imperium_engine::effects::{DecisionInput, DecisionRequest};
use imperium_engine::rules::{Engine, MoveRejection};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn content() -> ContentDb {
    ContentDb::from_json(include_str!("fixtures/content.json")).expect("fixture content should parse")
}

fn two_players(first: PlayerState) -> GameState {
    GameState::new(vec![first, PlayerState::new("Rival").with_hand(&["dagger"])], 42).expect("valid table")
}

fn card(id: &str) -> CardId {
    CardId::new(id)
}

fn location(id: &str) -> LocationId {
    LocationId::new(id)
}

/// Leto's landsraad discount makes the High Council affordable with 4 solari.
#[test]
fn test_leto_discount_at_high_council() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(
        PlayerState::new("Leto")
            .with_leader("leto")
            .with_resource(names::SOLARI, 4)
            .with_hand(&["dagger"]),
    );
    game.intrigue_deck.push(IntrigueId::new("windfall"));

    let summary = engine
        .commit_move(&mut game, P0, &card("dagger"), &location("high_council"), DecisionInput::none())
        .expect("move should succeed");

    let leto = &game.players[P0];
    assert_eq!(leto.resources.get(names::SOLARI), 0);
    assert_eq!(leto.reveal_stats.total_persuasion, 2);
    assert_eq!(leto.intrigue_hand, vec![IntrigueId::new("windfall")]);
    assert_eq!(leto.discard_pile, vec![card("dagger")]);
    assert_eq!(leto.agents_placed, 1);
    assert_eq!(game.occupant(&location("high_council")), Some(P0));
    assert!(summary.contains("(Paid 4 solari)"));
    assert_eq!(game.round_history.len(), 1);
}

/// Without a discount the same purchase is refused before anything changes.
#[test]
fn test_cannot_afford_location() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Feyd").with_resource(names::SOLARI, 4).with_hand(&["dagger"]));

    let result = engine.commit_move(&mut game, P0, &card("dagger"), &location("high_council"), DecisionInput::none());

    assert_eq!(
        result,
        Err(MoveRejection::CannotAfford {
            resource: names::SOLARI.to_string(),
            required: 5,
            has: 4,
        })
    );
    assert_eq!(game.players[P0].resources.get(names::SOLARI), 4);
    assert!(game.round_history.is_empty());
    assert!(!game.is_occupied(&location("high_council")));
}

#[test]
fn test_symbol_mismatch() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let game = two_players(PlayerState::new("Feyd").with_resource(names::SOLARI, 9).with_hand(&["diplomacy"]));

    let result = engine.validate_move(&game, P0, &card("diplomacy"), &location("high_council"));
    assert!(matches!(result, Err(MoveRejection::SymbolMismatch { .. })));
}

#[test]
fn test_card_not_in_hand() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let game = two_players(PlayerState::new("Feyd").with_hand(&["diplomacy"]));

    let result = engine.validate_move(&game, P0, &card("reconnaissance"), &location("arrakeen"));
    assert!(matches!(result, Err(MoveRejection::CardNotInHand { .. })));
}

#[test]
fn test_unknown_ids() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let game = two_players(PlayerState::new("Feyd").with_hand(&["dagger"]));

    assert_eq!(
        engine.validate_move(&game, P0, &card("dagger"), &location("kaitain")),
        Err(MoveRejection::UnknownLocation(location("kaitain")))
    );
    assert_eq!(
        engine.validate_move(&game, P0, &card("crysknife"), &location("arrakeen")),
        Err(MoveRejection::UnknownCard(card("crysknife")))
    );
    assert_eq!(
        engine.validate_move(&game, PlayerId::new(7), &card("dagger"), &location("arrakeen")),
        Err(MoveRejection::UnknownPlayer(PlayerId::new(7)))
    );
}

#[test]
fn test_wrong_phase_and_exhausted_agents() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Feyd").with_hand(&["reconnaissance"]));

    game.players[P0].agents_placed = 2;
    assert!(matches!(
        engine.validate_move(&game, P0, &card("reconnaissance"), &location("arrakeen")),
        Err(MoveRejection::NoAgentsLeft(_))
    ));

    game.players[P0].agents_placed = 0;
    game.phase = Phase::Reveal;
    assert_eq!(
        engine.validate_move(&game, P0, &card("reconnaissance"), &location("arrakeen")),
        Err(MoveRejection::WrongPhase(Phase::Reveal))
    );
}

/// Helena may share landsraad and spice trade spaces but not city spaces.
#[test]
fn test_helena_occupied_placement() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = GameState::new(
        vec![
            PlayerState::new("Rival")
                .with_resource(names::SOLARI, 5)
                .with_hand(&["dagger", "reconnaissance"]),
            PlayerState::new("Helena")
                .with_leader("helena")
                .with_resource(names::SOLARI, 5)
                .with_hand(&["dagger", "reconnaissance"]),
        ],
        42,
    )
    .expect("valid table");

    engine
        .commit_move(&mut game, P0, &card("dagger"), &location("high_council"), DecisionInput::none())
        .expect("rival move");
    engine
        .commit_move(&mut game, P0, &card("reconnaissance"), &location("arrakeen"), DecisionInput::none())
        .expect("rival move");

    assert!(engine
        .validate_move(&game, P1, &card("dagger"), &location("high_council"))
        .is_ok());
    assert!(matches!(
        engine.validate_move(&game, P1, &card("reconnaissance"), &location("arrakeen")),
        Err(MoveRejection::Occupied { .. })
    ));
}

#[test]
fn test_location_requirement() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Chani").with_hand(&["diplomacy"]));
    game.players[P0].influence[Faction::Fremen] = 1;

    assert!(matches!(
        engine.validate_move(&game, P0, &card("diplomacy"), &location("sietch_tabr")),
        Err(MoveRejection::RequirementUnmet(_))
    ));

    game.players[P0].influence[Faction::Fremen] = 2;
    engine
        .commit_move(&mut game, P0, &card("diplomacy"), &location("sietch_tabr"), DecisionInput::none())
        .expect("requirement met");

    let chani = &game.players[P0];
    assert_eq!(chani.influence[Faction::Fremen], 3);
    assert_eq!(chani.resources.get(names::TROOPS_GARRISON), 1);
    assert_eq!(chani.resources.get(names::WATER), 1);
}

/// The Mentat gives back the agent it used and draws a card.
#[test]
fn test_mentat_extra_agent() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Thufir").with_resource(names::SOLARI, 2).with_hand(&["dagger"]));
    game.players[P0].draw_deck = vec![card("diplomacy")];

    let summary = engine
        .commit_move(&mut game, P0, &card("dagger"), &location("mentat"), DecisionInput::none())
        .expect("mentat move");

    let thufir = &game.players[P0];
    assert_eq!(thufir.agents_placed, 0);
    assert_eq!(thufir.hand, vec![card("diplomacy")]);
    assert!(thufir.draw_deck.is_empty());
    assert!(summary.contains("temporary agent"));
}

#[test]
fn test_swordmaster_permanent_agent() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Gurney").with_resource(names::SOLARI, 8).with_hand(&["dagger"]));

    engine
        .commit_move(&mut game, P0, &card("dagger"), &location("swordmaster"), DecisionInput::none())
        .expect("swordmaster move");

    let gurney = &game.players[P0];
    assert_eq!(gurney.agents_total, 3);
    assert_eq!(gurney.agents_placed, 1);
    assert_eq!(gurney.resources.get(names::SOLARI), 0);
}

/// Ilban draws when solari is actually paid, on top of the location's draw.
#[test]
fn test_ilban_draws_on_payment() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(
        PlayerState::new("Ilban")
            .with_leader("ilban")
            .with_resource(names::SOLARI, 2)
            .with_hand(&["dagger"]),
    );
    game.players[P0].draw_deck = vec![card("diplomacy"), card("dune")];

    let summary = engine
        .commit_move(&mut game, P0, &card("dagger"), &location("mentat"), DecisionInput::none())
        .expect("mentat move");

    assert_eq!(game.players[P0].hand, vec![card("diplomacy"), card("dune")]);
    assert!(summary.contains("| Leader: "));
}

#[test]
fn test_memnon_location_bonus() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(
        PlayerState::new("Memnon")
            .with_leader("memnon")
            .with_resource(names::WATER, 1)
            .with_hand(&["dune"]),
    );

    let summary = engine
        .commit_move(&mut game, P0, &card("dune"), &location("hagga_basin"), DecisionInput::none())
        .expect("hagga basin move");

    assert_eq!(game.players[P0].resources.get(names::SPICE), 3);
    assert_eq!(game.players[P0].resources.get(names::WATER), 0);
    assert!(summary.contains("| Leader bonus: "));
}

#[test]
fn test_seek_allies_destroys_itself() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Jessica").with_hand(&["seek_allies", "dagger"]));

    let summary = engine
        .commit_move(&mut game, P0, &card("seek_allies"), &location("secrets"), DecisionInput::none())
        .expect("secrets move");

    let jessica = &game.players[P0];
    assert_eq!(jessica.hand, vec![card("dagger")]);
    assert!(jessica.discard_pile.is_empty());
    assert_eq!(jessica.deck_pool, vec![card("dagger")]);
    assert_eq!(game.destroyed_pile, vec![card("seek_allies")]);
    assert_eq!(jessica.influence[Faction::BeneGesserit], 1);
    assert!(summary.contains("(Card Destroyed)"));
    assert!(summary.contains("needs manual resolution: intrigue deck empty"));
}

/// The proxy card runs the leader's signet ability instead of its own effect.
#[test]
fn test_signet_ring_runs_leader_ability() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(
        PlayerState::new("Leto")
            .with_leader("leto")
            .with_resource(names::SOLARI, 1)
            .with_hand(&["signet_ring"]),
    );

    let request = engine
        .move_decision(&game, P0, &card("signet_ring"), &location("arrakeen"))
        .expect("valid move");
    assert!(matches!(request, DecisionRequest::Exchange { ref source, .. } if source == "Landsraad Popularity"));

    let summary = engine
        .commit_move(&mut game, P0, &card("signet_ring"), &location("arrakeen"), DecisionInput::consent())
        .expect("signet move");

    let leto = &game.players[P0];
    assert_eq!(leto.resources.get(names::SOLARI), 0);
    assert_eq!(leto.resources.get(names::TROOPS_GARRISON), 2);
    assert!(summary.contains("Signet (Landsraad Popularity)"));
}

#[test]
fn test_signet_ring_without_leader_soft_fails() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Nobody").with_hand(&["signet_ring"]));

    let summary = engine
        .commit_move(&mut game, P0, &card("signet_ring"), &location("arrakeen"), DecisionInput::none())
        .expect("move still commits");

    assert!(summary.contains("needs manual resolution"));
    assert_eq!(game.players[P0].resources.get(names::TROOPS_GARRISON), 1);
}

/// Declining the optional payment keeps the move but skips the troops.
#[test]
fn test_declined_payment_is_partial() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Duncan").with_resource(names::SOLARI, 4).with_hand(&["dagger"]));

    assert!(matches!(
        engine.move_decision(&game, P0, &card("dagger"), &location("rally_troops")),
        Ok(DecisionRequest::OptionalPay { .. })
    ));

    let summary = engine
        .commit_move(&mut game, P0, &card("dagger"), &location("rally_troops"), DecisionInput::none())
        .expect("move commits");

    let duncan = &game.players[P0];
    assert_eq!(duncan.resources.get(names::SOLARI), 4);
    assert_eq!(duncan.resources.get(names::TROOPS_GARRISON), 0);
    assert_eq!(duncan.agents_placed, 1);
    assert_eq!(duncan.discard_pile, vec![card("dagger")]);
    assert!(summary.contains("declined optional payment"));
}

#[test]
fn test_consented_payment() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Duncan").with_resource(names::SOLARI, 4).with_hand(&["dagger"]));

    engine
        .commit_move(&mut game, P0, &card("dagger"), &location("rally_troops"), DecisionInput::consent())
        .expect("move commits");

    assert_eq!(game.players[P0].resources.get(names::SOLARI), 0);
    assert_eq!(game.players[P0].resources.get(names::TROOPS_GARRISON), 4);
}

#[test]
fn test_sell_melange_choice() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Rabban").with_resource(names::SPICE, 3).with_hand(&["dune"]));

    match engine.move_decision(&game, P0, &card("dune"), &location("sell_melange")) {
        Ok(DecisionRequest::Choice { options, .. }) => assert_eq!(options.len(), 2),
        other => panic!("expected a choice, got {:?}", other),
    }

    engine
        .commit_move(
            &mut game,
            P0,
            &card("dune"),
            &location("sell_melange"),
            DecisionInput::choose(1).with_consent(),
        )
        .expect("move commits");

    assert_eq!(game.players[P0].resources.get(names::SPICE), 0);
    assert_eq!(game.players[P0].resources.get(names::SOLARI), 8);
}

#[test]
fn test_missing_choice_still_places_agent() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = two_players(PlayerState::new("Rabban").with_resource(names::SPICE, 3).with_hand(&["dune"]));

    let summary = engine
        .commit_move(&mut game, P0, &card("dune"), &location("sell_melange"), DecisionInput::none())
        .expect("move commits");

    assert_eq!(game.players[P0].resources.get(names::SPICE), 3);
    assert_eq!(game.occupant(&location("sell_melange")), Some(P0));
    assert!(summary.contains("choice required"));
}

/// The last agent placed moves the game to the reveal phase.
#[test]
fn test_last_agent_advances_phase() {
    let content = content();
    let config = RulesConfig::default();
    let engine = Engine::new(&content, &config);
    let mut game = GameState::new(
        vec![PlayerState::new("Solo").with_hand(&["reconnaissance", "dagger", "diplomacy"])],
        42,
    )
    .expect("valid table");

    engine
        .commit_move(&mut game, P0, &card("reconnaissance"), &location("arrakeen"), DecisionInput::none())
        .expect("first agent");
    assert_eq!(game.phase, Phase::AgentTurn);

    engine
        .commit_move(&mut game, P0, &card("dagger"), &location("rally_troops"), DecisionInput::none())
        .expect("second agent");
    assert_eq!(game.phase, Phase::Reveal);
    assert_eq!(game.players[P0].reveal_stats.total_persuasion, 1);
}
