//! Focused unit tests covering rank CLI configuration and execution.

use super::helpers::{Snapshot, write_utf8};
use super::rank::{RankArgs, RankConfig, config_from_layers_for_test, execute_rank};
use clap::CommandFactory;
use ortho_config::{OrthoConfig, SubcmdConfigMerge, subcommand::CmdName};
use super::*;
use courtside_core::{DistanceUnit, FallbackOrder, OccupancyTier, SearchField};
use rstest::{fixture, rstest};

fn args_for(snapshot: &Snapshot) -> RankArgs {
    RankArgs {
        records: Some(snapshot.path().to_path_buf()),
        ..RankArgs::default()
    }
}

fn ids(records: &[courtside_core::DisplayRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

#[fixture]
fn snapshot() -> Snapshot {
    Snapshot::with_sample_courts()
}

#[rstest]
fn converting_without_records_errors() {
    let err = RankConfig::try_from(RankArgs::default()).expect_err("missing records should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RECORDS);
            assert_eq!(env, ENV_RECORDS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(Some(37.7), None, ARG_LONGITUDE)]
#[case(None, Some(-122.4), ARG_LATITUDE)]
fn half_an_origin_is_rejected(
    snapshot: Snapshot,
    #[case] latitude: Option<f64>,
    #[case] longitude: Option<f64>,
    #[case] expected_missing: &'static str,
) {
    let args = RankArgs {
        latitude,
        longitude,
        ..args_for(&snapshot)
    };
    match RankConfig::try_from(args).expect_err("incomplete origin") {
        CliError::IncompleteOrigin { missing, .. } => assert_eq!(missing, expected_missing),
        other => panic!("expected IncompleteOrigin, found {other:?}"),
    }
}

#[rstest]
fn out_of_range_origin_is_rejected(snapshot: Snapshot) {
    let args = RankArgs {
        latitude: Some(91.0),
        longitude: Some(0.0),
        ..args_for(&snapshot)
    };
    match RankConfig::try_from(args).expect_err("invalid origin") {
        CliError::InvalidOrigin(_) => {}
        other => panic!("expected InvalidOrigin, found {other:?}"),
    }
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_max_distance_is_rejected(snapshot: Snapshot, #[case] max_distance: f64) {
    let args = RankArgs {
        max_distance: Some(max_distance),
        ..args_for(&snapshot)
    };
    match RankConfig::try_from(args).expect_err("invalid cap") {
        CliError::InvalidMaxDistance { field, .. } => assert_eq!(field, ARG_MAX_DISTANCE),
        other => panic!("expected InvalidMaxDistance, found {other:?}"),
    }
}

#[rstest]
fn options_flow_into_the_query(snapshot: Snapshot) {
    let args = RankArgs {
        search: Some("courts".into()),
        fields: vec![SearchField::Name],
        limit: Some(2),
        max_distance: Some(400.0),
        unit: Some(DistanceUnit::Kilometres),
        alphabetical: true,
        skip_invalid_records: true,
        ..args_for(&snapshot)
    };
    let config = RankConfig::try_from(args).expect("config should build");
    assert_eq!(config.query.search.as_deref(), Some("courts"));
    assert_eq!(config.query.fields, vec![SearchField::Name]);
    assert_eq!(config.query.max_results, Some(2));
    assert_eq!(config.query.max_distance, Some(400.0));
    assert_eq!(config.query.unit, DistanceUnit::Kilometres);
    assert_eq!(config.query.fallback_order, FallbackOrder::Alphabetical);
    assert!(config.query.origin.is_none());
    assert!(config.skip_invalid_records);
}

#[rstest]
fn unset_fields_fall_back_to_name_and_address(snapshot: Snapshot) {
    let config = RankConfig::try_from(args_for(&snapshot)).expect("config should build");
    assert_eq!(config.query.fields, SearchField::defaults());
    assert_eq!(config.query.unit, DistanceUnit::Miles);
}

#[rstest]
fn validate_sources_reports_missing_snapshot() {
    let snapshot = Snapshot::new();
    let config = RankConfig::try_from(args_for(&snapshot)).expect("config should build");
    match config.validate_sources().expect_err("missing snapshot") {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_RECORDS);
            assert_eq!(path, snapshot.path());
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let snapshot = Snapshot::new();
    std::fs::create_dir(snapshot.path().as_std_path()).expect("snapshot directory");
    let config = RankConfig::try_from(args_for(&snapshot)).expect("config should build");
    match config.validate_sources().expect_err("directory snapshot") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_RECORDS),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn ranks_sample_courts_from_an_origin(snapshot: Snapshot) {
    let args = RankArgs {
        latitude: Some(37.7749),
        longitude: Some(-122.4194),
        ..args_for(&snapshot)
    };
    let config = RankConfig::try_from(args).expect("config should build");
    let records = execute_rank(&config).expect("rank should succeed");

    assert_eq!(ids(&records), ["civic", "venice", "2"]);
    let venice = records.get(1).expect("venice present");
    assert_eq!(venice.position, 2);
    assert_eq!(venice.distance.as_deref(), Some("342.7 mi"));
    assert_eq!(venice.rating.as_deref(), Some("4.5"));
    assert_eq!(venice.phone.as_deref(), Some("(310) 555-0100"));
    let downtown = records.get(2).expect("downtown present");
    assert_eq!(
        downtown.occupancy.as_ref().map(|badge| badge.tier),
        Some(OccupancyTier::VeryHigh)
    );
    assert_eq!(downtown.rating.as_deref(), Some("unrated"));
}

#[rstest]
fn ranks_without_origin_in_snapshot_order(snapshot: Snapshot) {
    let config = RankConfig::try_from(args_for(&snapshot)).expect("config should build");
    let records = execute_rank(&config).expect("rank should succeed");
    assert_eq!(ids(&records), ["venice", "2", "civic"]);
    assert!(records.iter().all(|record| record.distance.is_none()));
}

#[rstest]
fn run_rank_prints_camel_case_json(snapshot: Snapshot) {
    let args = RankArgs {
        search: Some("venice".into()),
        ..args_for(&snapshot)
    };
    let mut stdout = Vec::new();
    rank::run_rank_with(args, &mut stdout).expect("rank should succeed");
    let printed: serde_json::Value =
        serde_json::from_slice(&stdout).expect("output should be JSON");
    let first = printed.get(0).expect("one record printed");
    assert_eq!(first.get("id"), Some(&serde_json::json!("venice")));
    assert!(first.get("occupancy").is_some());
    assert_eq!(printed.as_array().map(Vec::len), Some(1));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "records": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let snapshot = Snapshot::new();
    let env_records = snapshot.root().join("from-env.json");
    write_utf8(&env_records, b"[]");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "search": "courts",
            "limit": 5,
            "unit": "km",
        }),
        None,
    );
    composer.push_environment(json!({
        "records": env_records.as_str(),
        "limit": 3,
    }));
    composer.push_cli(json!({ "limit": 2 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.records, env_records);
    assert_eq!(config.query.search.as_deref(), Some("courts"));
    assert_eq!(config.query.max_results, Some(2));
    assert_eq!(config.query.unit, DistanceUnit::Kilometres);
}

fn parse_rank(extra: &[&str]) -> RankArgs {
    let argv = ["courtside", "rank"].into_iter().chain(extra.iter().copied());
    match parse_cli(argv).expect("rank arguments should parse") {
        Invocation::Run(Cli {
            command: Command::Rank(args),
            ..
        }) => args,
        other => panic!("expected the rank command, found {other:?}"),
    }
}

#[rstest]
fn documented_env_vars_match_the_subcommand_prefix() {
    let name = RankArgs::command().get_name().to_owned();
    assert_eq!(name, "rank");
    let prefix = format!(
        "{}CMDS_{}_",
        RankArgs::prefix(),
        CmdName::new(&name).env_key()
    );
    assert_eq!(prefix, "COURTSIDE_CMDS_RANK_");
    for (env, field) in [
        (ENV_RECORDS, "RECORDS"),
        (ENV_LATITUDE, "LATITUDE"),
        (ENV_LONGITUDE, "LONGITUDE"),
    ] {
        assert_eq!(env, format!("{prefix}{field}"));
    }
}

#[rstest]
fn unset_cli_flags_are_left_out_of_the_cli_layer() {
    let args = parse_rank(&["courts.json"]);
    let layer = ortho_config::sanitize_value(&args).expect("args should serialise");
    assert_eq!(layer, serde_json::json!({ "records": "courts.json" }));
}

#[rstest]
fn parsed_flags_survive_load_and_merge(snapshot: Snapshot) {
    let args = parse_rank(&[
        snapshot.path().as_str(),
        "--alphabetical",
        "--field",
        "attr:hours",
    ]);
    let merged = args.load_and_merge().expect("merge should succeed");
    assert_eq!(merged.records.as_deref(), Some(snapshot.path()));
    assert!(merged.alphabetical);
    assert_eq!(merged.fields, vec![SearchField::Attribute("hours".into())]);
}

#[rstest]
fn file_and_env_switches_survive_a_parsed_cli_layer(snapshot: Snapshot) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let args = parse_rank(&[snapshot.path().as_str()]);
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "alphabetical": true,
            "fields": ["name", "attr:hours"],
        }),
        None,
    );
    composer.push_environment(json!({ "skip_invalid_records": true }));
    composer.push_cli(ortho_config::sanitize_value(&args).expect("args should serialise"));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.records, snapshot.path());
    assert_eq!(config.query.fallback_order, FallbackOrder::Alphabetical);
    assert_eq!(
        config.query.fields,
        vec![SearchField::Name, SearchField::Attribute("hours".into())]
    );
    assert!(config.skip_invalid_records);
}
