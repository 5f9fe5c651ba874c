use std::fs;
use std::path::Path;

use fleet_content::ContentFactory;
use fleet_core::action::{ChangeScore, DeclareWinner, encode_records};
use fleet_core::state::Outcome;
use fleet_core::{ActionEngine, ActionRecord, AdmiralId, Effect, InitialId, TriggerKind, Verb};

const BASES: &str = r#"(
    bases: [
        (name: "flagship", definition: (
            attributes: "CAN_TURN | CAN_BE_HIT",
            max_health: 300,
            tables: (destroy: (begin: 0, end: 2)),
        )),
        (name: "buoy", definition: ()),
    ],
)"#;

const LEVEL: &str = r#"(
    name: "last_stand",
    admirals: [(cash: 2560), (cash: 0)],
    initials: [
        (base: BaseHandle(0), owner: Some(AdmiralId(0)), location: (x: 0, y: 0)),
        (base: BaseHandle(1), location: (x: 50, y: 50), hidden: true),
    ],
    conditions: 2,
)"#;

fn destroy_table() -> Vec<ActionRecord> {
    vec![
        ActionRecord::new(Verb::ChangeScore(ChangeScore {
            player: None,
            which: 0,
            value: 10,
        })),
        ActionRecord::new(Verb::DeclareWinner(DeclareWinner {
            player: None,
            next_chapter: Some(2),
            text_id: 0,
        })),
    ]
}

fn write_unit(dir: &Path, actions: &[u8]) {
    fs::write(dir.join("config.toml"), "max_delayed_actions = 16\n").unwrap();
    fs::write(dir.join("actions.bin"), actions).unwrap();
    fs::write(dir.join("bases.ron"), BASES).unwrap();
    fs::create_dir(dir.join("levels")).unwrap();
    fs::write(dir.join("levels").join("last_stand.ron"), LEVEL).unwrap();
}

#[test]
fn loaded_level_runs_its_destroy_table() {
    let dir = tempfile::tempdir().unwrap();
    write_unit(dir.path(), &encode_records(&destroy_table()));

    let content = ContentFactory::new(dir.path())
        .load_level_content("last_stand")
        .unwrap();
    assert_eq!(content.config.max_delayed_actions, 16);

    let mut state = content.new_game(11).unwrap();
    assert_eq!(state.objects.len(), 1, "hidden initials stay out of play");
    let flagship = state.initial_object(InitialId(0)).unwrap();

    let outcome = ActionEngine::new(&mut state)
        .trigger(content.env(), flagship, TriggerKind::Destroy, None)
        .unwrap();

    let winner = Outcome {
        winner: Some(AdmiralId(0)),
        next_chapter: Some(2),
        text_id: 0,
    };
    assert_eq!(
        outcome.effects,
        vec![
            Effect::ScoreChanged {
                admiral: AdmiralId(0),
                which: 0,
                score: 10,
            },
            Effect::WinnerDeclared(winner),
        ]
    );
    assert_eq!(state.level.outcome, Some(winner));
}

#[test]
fn table_past_the_pool_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_unit(dir.path(), &encode_records(&destroy_table()[..1]));

    let error = ContentFactory::new(dir.path())
        .load_level_content("last_stand")
        .err()
        .unwrap();
    let message = format!("{error:#}");
    assert!(message.contains("flagship"), "{message}");
    assert!(message.contains("pool has 1"), "{message}");
}

#[test]
fn corrupt_action_pool_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let unknown_verb = hex::decode(format!("ff00{}", "00".repeat(46))).unwrap();
    write_unit(dir.path(), &unknown_verb);

    let error = ContentFactory::new(dir.path()).load_actions().unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("actions.bin"), "{message}");
    assert!(message.contains("unknown verb"), "{message}");
}

#[test]
fn missing_level_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_unit(dir.path(), &encode_records(&destroy_table()));

    let error = ContentFactory::new(dir.path())
        .load_level("skirmish")
        .unwrap_err();
    assert!(format!("{error:#}").contains("skirmish.ron"));
}
