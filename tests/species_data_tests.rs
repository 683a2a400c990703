use menagerie::battle::{Dice, Rng};
use menagerie::data::{
    load_engine_config, load_species_index, validate_skill_trees, validate_species_dataset,
    DataRegistry, EngineConfig, Species, DEFAULT_CONFIG_PATH, DEFAULT_SPECIES_PATH,
};

#[test]
fn shipped_species_dataset_parses_and_covers_every_species() {
    let index = load_species_index(DEFAULT_SPECIES_PATH).expect("shipped dataset should parse");
    for species in Species::ALL {
        assert!(
            index.record(species).is_some(),
            "missing species '{}'",
            species.key()
        );
    }
}

#[test]
fn shipped_species_dataset_validates_clean() {
    let report =
        validate_species_dataset(DEFAULT_SPECIES_PATH).expect("shipped dataset should parse");
    assert!(
        !report.has_errors(),
        "unexpected errors: {:?}",
        report.diagnostics
    );
}

#[test]
fn registered_skill_trees_validate_clean() {
    let report = validate_skill_trees();
    assert!(
        !report.has_errors(),
        "unexpected errors: {:?}",
        report.diagnostics
    );
}

#[test]
fn missing_dataset_is_a_fatal_error() {
    let err = load_species_index("data/nope.json").unwrap_err();
    assert!(err.to_string().contains("unable to read"));
}

#[test]
fn malformed_dataset_is_a_fatal_error() {
    let path = std::env::temp_dir().join("menagerie-malformed-species.json");
    std::fs::write(&path, "{ not json").expect("fixture should be written");
    let err = load_species_index(path.to_string_lossy().as_ref()).unwrap_err();
    assert!(err.to_string().contains("malformed"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn shipped_config_matches_compiled_defaults() {
    let config = load_engine_config(DEFAULT_CONFIG_PATH);
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let config = load_engine_config("data/nope.json");
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn registry_spawns_level_one_combatants_from_templates() {
    let registry = DataRegistry::load().expect("shipped data should load");
    let slime = registry.spawn(Species::Slime).expect("slime template");

    assert_eq!(slime.level, 1);
    assert_eq!(slime.current.max_hp, 100);
    assert_eq!(slime.current_hp, 100);
    assert_eq!(slime.base, slime.current);
    assert!((slime.dodge_rate - 0.05).abs() < 1e-12);
    assert!((slime.reward.scout_rate - 0.2).abs() < 1e-12);
    assert!(slime.skills.is_empty());
    assert_eq!(slime.tree.name, "Gel Arts");
}

#[test]
fn wild_spawns_stay_within_the_jitter_bounds() {
    let registry = DataRegistry::load().expect("shipped data should load");
    let template = registry
        .record(Species::Goblin)
        .expect("goblin template")
        .clone();

    let mut rng = Rng::new(7);
    for _ in 0..50 {
        let wild = registry
            .spawn_wild(Species::Goblin, &mut rng)
            .expect("goblin template");

        assert!((1..=3).contains(&wild.level));
        let low = (template.max_hp as f64 * 0.8) as i32;
        let high = (template.max_hp as f64 * 1.2) as i32;
        assert!(
            (low..=high).contains(&wild.current.max_hp),
            "hp {} outside [{low}, {high}]",
            wild.current.max_hp
        );
        assert_eq!(wild.current_hp, wild.current.max_hp);

        // rewards scale up with level, scouting gets harder
        let scale = 1.0 + wild.level as f64 * 0.1;
        assert_eq!(
            wild.reward.experience,
            (template.reward_experience as f64 * scale) as u32
        );
        assert!(wild.reward.scout_rate < template.scout_rate);
    }
}

#[test]
fn wild_spawning_is_deterministic_per_seed() {
    let registry = DataRegistry::load().expect("shipped data should load");

    let mut first_dice = Rng::new(11);
    let mut second_dice = Rng::new(11);
    let first = registry
        .spawn_wild(Species::Wolf, &mut first_dice)
        .expect("wolf template");
    let second = registry
        .spawn_wild(Species::Wolf, &mut second_dice)
        .expect("wolf template");

    assert_eq!(first, second);
}

#[test]
fn unknown_species_key_resolution() {
    assert_eq!(Species::from_key("wolf"), Some(Species::Wolf));
    assert_eq!(Species::from_key("dragon"), None);
}

#[test]
fn dice_draws_are_uniform_unit_interval() {
    let mut rng = Rng::new(3);
    for _ in 0..100 {
        let draw = rng.uniform();
        assert!((0.0..1.0).contains(&draw));
    }
}
