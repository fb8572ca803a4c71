// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use overpower_catalog::{load_catalog_from_workspace, InMemoryCatalog};
use overpower_model::{CardType, Deck};
use overpower_rules::{
    total_threat, validate_deck, DeckInput, DeckRules, RuleId, Severity, ValidationOutcome,
};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn catalog() -> InMemoryCatalog {
    load_catalog_from_workspace(&workspace_root()).expect("load catalog")
}

fn deck(name: &str) -> Deck {
    let path = workspace_root().join("data/decks").join(name);
    let raw = std::fs::read_to_string(path).expect("read deck");
    serde_json::from_str(&raw).expect("decode deck")
}

#[test]
fn sample_deck_is_legal() {
    let catalog = catalog();
    let deck = deck("jungle_legal.json");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    assert!(report.violations.is_empty(), "{:#?}", report.violations);
    assert_eq!(report.outcome, ValidationOutcome::Legal);
    assert_eq!(report.total_threat, 76);
    assert_eq!(report.draw_pile_count, 54);
}

#[test]
fn broken_deck_reports_every_rule_in_order() {
    let catalog = catalog();
    let deck = deck("broken.json");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let got: Vec<(RuleId, &str)> = report
        .violations
        .iter()
        .map(|v| (v.rule, v.message.as_str()))
        .collect();
    let expected = vec![
        (RuleId::CharacterCount, "Deck must have exactly 4 characters (found 3)"),
        (
            RuleId::MissionSet,
            "All mission cards must be from the same mission set (found: Barsoom, King of the Jungle)",
        ),
        (RuleId::LocationCount, "Deck may have at most 1 location (found 2)"),
        (
            RuleId::DeckSize,
            "Deck must have at least 56 cards in draw pile (found 17)",
        ),
        (
            RuleId::AngryMobLimit,
            "Only one \"Angry Mob\" character is allowed per deck",
        ),
        (
            RuleId::UnusableSpecial,
            "\"Hypnotic Gaze\" requires character \"Dracula\" in your team",
        ),
        (
            RuleId::OnePerDeckViolation,
            "\"The World Ends\" is limited to one per deck (found 2)",
        ),
        (
            RuleId::UnusablePower,
            "\"8 - Energy\" (Power Card) requires a character with 8+ Energy",
        ),
        (
            RuleId::UnusableUniverse,
            "\"Radium Gadget\" (Universe Card) requires a character with 9+ Intelligence",
        ),
        (
            RuleId::AssistLimit,
            "Deck may include only one Assist special card (found: Allied Strike, Grim Resolve)",
        ),
        (
            RuleId::FortificationLimit,
            "Deck may include only one Fortification aspect card (found: Palisade Wall, Stone Keep)",
        ),
        (
            RuleId::UnknownCard,
            "Card \"p9z\" of type power is not in the catalog",
        ),
        (
            RuleId::InvalidReserve,
            "Reserve character \"carter\" is not one of the deck's characters",
        ),
    ];
    assert_eq!(got, expected);
    assert_eq!(report.outcome, ValidationOutcome::NotLegal);
    assert_eq!(report.total_threat, 55);

    let unknown = &report.violations[11];
    assert_eq!(unknown.severity, Severity::Warning);
    assert_eq!(unknown.evidence, "power/p9z");
}

#[test]
fn reserve_adjustment_raises_threat_over_the_cap() {
    let catalog = catalog();
    let rules = DeckRules::default();
    let mut deck = deck("jungle_legal.json");
    deck.set_reserve_character(Some("victory")).expect("reserve");
    let input = DeckInput::from(&deck);
    assert_eq!(total_threat(&input, &catalog, &rules), 78);
    let report = validate_deck(&input, &catalog, &rules);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.violations[0].message,
        "Deck threat level must be 76 or less (found 78)"
    );
}

#[test]
fn events_raise_the_draw_pile_minimum() {
    let catalog = catalog();
    let mut deck = deck("jungle_legal.json");
    deck.add_card(CardType::Event, "e_stampede", 1, None)
        .expect("add event");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, RuleId::DeckSize);
    assert_eq!(
        report.violations[0].message,
        "Deck must have at least 56 cards in draw pile (found 55)"
    );
}

#[test]
fn events_must_match_a_deck_mission_set() {
    let catalog = catalog();
    let mut deck = deck("jungle_legal.json");
    deck.add_card(CardType::Event, "e_dust_storm", 1, None)
        .expect("add event");
    deck.add_card(CardType::Power, "p4c", 1, None).expect("pad");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let rules: Vec<RuleId> = report.violations.iter().map(|v| v.rule).collect();
    assert_eq!(rules, vec![RuleId::UnusableEvent]);
    assert_eq!(
        report.violations[0].message,
        "\"Dust Storm\" requires mission set \"Barsoom\" in your deck"
    );
}

#[test]
fn angry_mob_specials_need_a_matching_mob() {
    let catalog = catalog();
    let mut deck = deck("jungle_legal.json");
    deck.add_card(CardType::Special, "s_torches", 1, None)
        .expect("add special");
    deck.add_card(CardType::Special, "s_strength_in_numbers", 1, None)
        .expect("add special");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let messages: Vec<&str> = report.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "\"Torches and Pitchforks\" requires an \"Angry Mob\" character in your team",
            "\"Strength in Numbers\" requires an \"Angry Mob\" character in your team",
        ]
    );

    deck.remove_card(CardType::Character, "victory", 1)
        .expect("remove");
    deck.add_card(CardType::Character, "mob_industrial", 1, None)
        .expect("add mob");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let unusable: Vec<&str> = report
        .violations
        .iter()
        .filter(|v| v.rule == RuleId::UnusableSpecial)
        .map(|v| v.message.as_str())
        .collect();
    assert_eq!(
        unusable,
        vec!["\"Torches and Pitchforks\" requires an \"Angry Mob: Middle Ages\" character in your team"]
    );
}

#[test]
fn limited_decks_keep_their_violations() {
    let catalog = catalog();
    let mut deck = deck("broken.json");
    deck.is_limited = true;
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    assert_eq!(report.outcome, ValidationOutcome::Limited);
    assert!(!report.is_legal());
    assert_eq!(report.violations.len(), 13);
}

#[test]
fn empty_deck_fails_counts_but_not_set_rules() {
    let catalog = catalog();
    let deck = Deck::new("empty", "Nothing Yet");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let rules: Vec<RuleId> = report.violations.iter().map(|v| v.rule).collect();
    assert_eq!(
        rules,
        vec![RuleId::CharacterCount, RuleId::MissionCount, RuleId::DeckSize]
    );
}

#[test]
fn ambush_and_cataclysm_specials_are_exclusive() {
    let catalog = catalog();
    let mut deck = deck("jungle_legal.json");
    deck.add_card(CardType::Special, "s_night_raid", 1, None)
        .expect("add ambush");
    deck.add_card(CardType::Special, "s_world_ends", 1, None)
        .expect("add cataclysm");
    deck.add_card(CardType::Special, "s_eclipse_of_worlds", 1, None)
        .expect("add cataclysm");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let got: Vec<(RuleId, &str)> = report
        .violations
        .iter()
        .map(|v| (v.rule, v.message.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (
                RuleId::AmbushLimit,
                "Deck may include only one Ambush special card (found: Ambush at Dusk, Night Raid)",
            ),
            (
                RuleId::CataclysmLimit,
                "Deck may include only one Cataclysm special card (found: Eclipse of Worlds, The World Ends)",
            ),
        ]
    );
    assert_eq!(report.violations[1].evidence, "Eclipse of Worlds, The World Ends");
}

#[test]
fn unknown_cards_do_not_count_toward_deck_rules() {
    let catalog = catalog();
    let mut deck = deck("jungle_legal.json");
    deck.add_card(CardType::Character, "nobody", 1, None)
        .expect("add unknown character");
    deck.add_card(CardType::Mission, "m_lost", 1, None)
        .expect("add unknown mission");
    deck.add_card(CardType::Location, "l_nowhere", 1, None)
        .expect("add unknown location");
    deck.add_card(CardType::Event, "e_unknown", 1, None)
        .expect("add unknown event");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    let rules: Vec<RuleId> = report.violations.iter().map(|v| v.rule).collect();
    assert_eq!(rules, vec![RuleId::UnknownCard; 4]);
    assert!(report.is_legal());
    assert_eq!(report.outcome, ValidationOutcome::Legal);
    assert_eq!(report.draw_pile_count, 54);
}

#[test]
fn oversized_quantities_saturate_instead_of_overflowing() {
    let catalog = catalog();
    let mut deck = deck("jungle_legal.json");
    let power = deck
        .cards
        .iter_mut()
        .find(|c| c.card_type == CardType::Power)
        .expect("power entry");
    power.quantity = u32::MAX;
    assert!(deck.validate_shape().is_err());

    let report = validate_deck(&DeckInput::from(&deck), &catalog, &DeckRules::default());
    assert_eq!(report.draw_pile_count, u32::MAX);
    assert!(!report.has_rule(RuleId::DeckSize));
    assert_eq!(report.total_threat, 76);
}
