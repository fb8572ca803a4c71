// SPDX-License-Identifier: Apache-2.0

use overpower_model::{Deck, PowerType, Stat};

#[test]
fn deck_document_decodes_with_defaults() {
    let deck: Deck = serde_json::from_str(
        r#"{
            "id": "deck-7",
            "name": "Venus Expedition",
            "reserve_character": "carson",
            "cards": [
                {"id": "character_carson", "type": "character", "cardId": "carson", "quantity": 1},
                {"id": "training_t1", "type": "training", "cardId": "t1", "quantity": 1, "exclude_from_draw": true}
            ],
            "created_at": "2024-03-01T10:00:00Z"
        }"#,
    )
    .expect("decode deck");
    assert!(!deck.is_limited);
    assert_eq!(deck.reserve_character.as_deref(), Some("carson"));
    assert!(deck.cards[1].exclude_from_draw);
    assert!(deck.created_at.is_some());
}

#[test]
fn deck_document_rejects_unknown_fields() {
    let err = serde_json::from_str::<Deck>(r#"{"id":"d","name":"n","owner":"x"}"#);
    assert!(err.is_err());
}

#[test]
fn power_type_wire_form_is_canonical() {
    let parsed: PowerType = serde_json::from_str("\"Multi-Power\"").expect("decode");
    assert_eq!(parsed, PowerType::MultiPower);
    assert_eq!(serde_json::to_string(&parsed).expect("encode"), "\"Multi Power\"");
    let single: PowerType = serde_json::from_str("\"Brute Force\"").expect("decode");
    assert_eq!(single, PowerType::Single(Stat::BruteForce));
}
