//! Match lifecycle: seating, dealing, scoring and termination.

use crate::config::MatchConfig;
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::deal::DealStatus;
use crate::domain::match_state::{Match, MatchStatus, Player};
use crate::domain::scoring::VictoryKind;
use crate::domain::state::Team;
use crate::domain::tricks::PlayAction;
use crate::domain::Card;

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).unwrap()
}

fn players() -> Vec<Player> {
    (0..4)
        .map(|seat| Player::automated(seat as u32 + 1, format!("bot-{seat}"), seat))
        .collect()
}

fn started(config: MatchConfig) -> Match {
    let mut game = Match::new(config).unwrap();
    game.start(players()).unwrap();
    game
}

/// Seats 0 and 2 go out first with one card each.
fn team_zero_double_down(game: &mut Match) {
    game.start_deal_with([cards(&["3C"]), cards(&["4C"]), cards(&["5C"]), cards(&["6C"])])
        .unwrap();
    let deal = game.current_deal_mut().unwrap();
    deal.play_turn(0, PlayAction::Play(cards(&["3C"]))).unwrap();
    deal.play_turn(1, PlayAction::Pass).unwrap();
    let turn = deal.play_turn(2, PlayAction::Play(cards(&["5C"]))).unwrap();
    assert!(turn.deal_finished);
    game.complete_deal().unwrap();
}

#[test]
fn rejects_malformed_player_lists() {
    let mut game = Match::new(MatchConfig::default()).unwrap();

    let three = players().into_iter().take(3).collect();
    assert_eq!(game.start(three).unwrap_err().code(), "INVALID_PLAYERS");

    let mut duplicate = players();
    duplicate[3].seat = 1;
    assert_eq!(game.start(duplicate).unwrap_err().code(), "INVALID_PLAYERS");

    let mut out_of_range = players();
    out_of_range[0].seat = 4;
    assert_eq!(game.start(out_of_range).unwrap_err().code(), "INVALID_PLAYERS");

    assert_eq!(game.status, MatchStatus::Pending);
}

#[test]
fn seats_players_in_seat_order() {
    let mut game = Match::new(MatchConfig::default()).unwrap();
    let mut shuffled = players();
    shuffled.reverse();
    game.start(shuffled).unwrap();
    let seats: Vec<u8> = game.players.iter().map(|p| p.seat).collect();
    assert_eq!(seats, vec![0, 1, 2, 3]);
    assert!(game.started_at.is_some());
}

#[test]
fn lifecycle_calls_out_of_order_are_invalid_state() {
    let mut game = Match::new(MatchConfig::default()).unwrap();
    assert_eq!(game.start_deal().unwrap_err().code(), "INVALID_STATE");

    game.start(players()).unwrap();
    assert_eq!(game.start(players()).unwrap_err().code(), "INVALID_STATE");
    assert_eq!(game.complete_deal().unwrap_err().code(), "INVALID_STATE");

    game.start_deal().unwrap();
    assert_eq!(game.start_deal().unwrap_err().code(), "INVALID_STATE");
    // Nobody has played yet.
    assert_eq!(game.complete_deal().unwrap_err().code(), "INVALID_STATE");
}

#[test]
fn first_deal_is_hosted_by_team_zero_without_tribute() {
    let mut game = started(MatchConfig::default().with_seed(5));
    let deal = game.start_deal().unwrap();
    assert_eq!(deal.deal_no, 1);
    assert_eq!(deal.host_team, Team(0));
    assert_eq!(deal.level, 2);
    assert_eq!(deal.status, DealStatus::Dealt);
    assert!(deal.tribute.is_none());
}

#[test]
fn same_seed_deals_same_hands() {
    let mut a = started(MatchConfig::default().with_seed(11));
    let mut b = started(MatchConfig::default().with_seed(11));
    assert_eq!(a.start_deal().unwrap().hands, b.start_deal().unwrap().hands);
}

#[test]
fn unseeded_matches_draw_their_own_seed() {
    let mut a = started(MatchConfig::default());
    let mut b = started(MatchConfig::default());
    assert_ne!(a.seed, b.seed);
    assert_eq!(a.config.seed, Some(a.seed));
    assert_ne!(a.start_deal().unwrap().hands, b.start_deal().unwrap().hands);

    // The drawn seed replays the same deal.
    let mut replay = started(MatchConfig::default().with_seed(a.seed));
    assert_eq!(replay.seed, a.seed);
    assert_eq!(
        replay.start_deal().unwrap().hands,
        a.current_deal().unwrap().hands
    );
}

#[test]
fn double_down_advances_winner_three_levels() {
    let mut game = started(MatchConfig::default());
    team_zero_double_down(&mut game);

    assert_eq!(game.levels, [5, 2]);
    let record = game.history.last().unwrap();
    assert_eq!(record.outcome.victory, VictoryKind::DoubleDown);
    assert_eq!(record.outcome.finishing_order, [0, 2, 3, 1]);
    assert_eq!(record.levels_after, [5, 2]);
    assert!(game.current.is_none());
    assert_eq!(game.status, MatchStatus::Started);
}

#[test]
fn next_deal_is_hosted_by_the_winners_and_owes_tribute() {
    let mut game = started(MatchConfig::default());
    team_zero_double_down(&mut game);

    let deal = game
        .start_deal_with([
            cards(&["3C", "9D"]),
            cards(&["AS", "4D"]),
            cards(&["7C", "8D"]),
            cards(&["KS", "4H"]),
        ])
        .unwrap();
    assert_eq!(deal.deal_no, 2);
    assert_eq!(deal.host_team, Team(0));
    assert_eq!(deal.level, 5);
    assert_eq!(deal.status, DealStatus::TributeInProgress);
    let phase = deal.tribute.as_ref().unwrap();
    assert_eq!(phase.victory, VictoryKind::DoubleDown);
    assert_eq!(phase.payers, vec![3, 1]);
}

#[test]
fn big_jokers_in_paying_hands_grant_immunity() {
    let mut game = started(MatchConfig::default());
    team_zero_double_down(&mut game);

    let deal = game
        .start_deal_with([
            cards(&["3C", "9D"]),
            cards(&["BJ", "4D"]),
            cards(&["7C", "8D"]),
            cards(&["BJ", "4H"]),
        ])
        .unwrap();
    assert_eq!(deal.status, DealStatus::Dealt);
    // The previous deal's first finisher leads.
    assert_eq!(deal.next_to_act(), Some(0));
}

#[test]
fn match_ends_once_a_level_passes_the_threshold() {
    let config = MatchConfig {
        starting_level: 12,
        winning_threshold: 12,
        ..MatchConfig::default()
    };
    let mut game = started(config);
    team_zero_double_down(&mut game);

    assert_eq!(game.levels, [14, 12]);
    assert_eq!(game.status, MatchStatus::Finished);
    assert_eq!(game.winner, Some(Team(0)));
    assert!(game.duration.is_some());
    assert_eq!(game.start_deal().unwrap_err().code(), "INVALID_STATE");
}

#[test]
fn level_equal_to_the_threshold_keeps_playing() {
    let config = MatchConfig {
        starting_level: 10,
        winning_threshold: 13,
        ..MatchConfig::default()
    };
    let mut game = started(config);
    team_zero_double_down(&mut game);

    assert_eq!(game.levels, [13, 10]);
    assert_eq!(game.status, MatchStatus::Started);
    assert_eq!(game.winner, None);
    assert!(game.duration.is_none());
    let deal = game.start_deal().unwrap();
    assert_eq!(deal.deal_no, 2);
    assert_eq!(deal.level, 13);
}
