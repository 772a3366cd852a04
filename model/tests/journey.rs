use journey::{EngineConfig, Error, Journey, ParseMode};

const AUSTIN_TO_LA: &str = "\
0_Austin_LosAngeles\t2024-07-09 07:27:31.270921\t30.267115\t-97.743072
1_Austin_LosAngeles\t2024-07-09 07:37:31.270921\t30.301442\t-97.855318
2_Austin_LosAngeles\t2024-07-09 07:47:31.270921\t30.352187\t-98.012455

3_Austin_LosAngeles\t2024-07-09 07:57:31.270921\t30.402310\t-98.170211
4_Austin_LosAngeles\t2024-07-09 08:07:31.270921\t30.402310\t-98.170211
5_Austin_LosAngeles\t2024-07-09 08:17:31.270921\t30.455122\t-98.329870
";

#[test]
fn austin_leg() {
    let journey = Journey::analyze(AUSTIN_TO_LA, &EngineConfig::default()).unwrap();
    let records = &journey.records;

    // One record per non-empty line, in order
    assert_eq!(records.len(), 6);
    for (idx, record) in records.iter().enumerate() {
        assert_eq!(record.label, format!("{idx}_Austin_LosAngeles"));
    }

    assert_eq!(records[0].segment_distance_km, 0.0);
    assert_eq!(records[0].segment_speed_kmh, 0.0);
    assert_eq!(records[0].elapsed_minutes, 0.0);
    for pair in records.windows(2) {
        assert_eq!(
            pair[1].cumulative_distance_km,
            pair[0].cumulative_distance_km + pair[1].segment_distance_km
        );
        assert!(pair[1].elapsed_minutes >= pair[0].elapsed_minutes);
    }

    // Parked for one interval
    assert_eq!(records[4].segment_distance_km, 0.0);
    assert_eq!(records[4].segment_speed_kmh, 0.0);

    let summary = &journey.summary;
    assert_eq!(summary.sample_count, 6);
    assert_eq!(summary.total_duration_minutes, 50.0);
    assert_eq!(summary.total_distance_km, records[5].cumulative_distance_km);
    assert!(summary.rush_hour.morning);
    assert!(!summary.rush_hour.evening);
    // The parked segment and the first record drag the mean down
    assert_eq!(summary.speed.low_speed_segments, 2);

    // A mostly straight drive west
    let efficiency = journey.route_efficiency().unwrap();
    assert!(efficiency.ratio > 0.95 && efficiency.ratio <= 1.0);
    assert!(!efficiency.inefficient);
    assert_eq!(summary.efficiency, Some(efficiency));

    let expected_fuel = summary.total_distance_km * 0.08;
    assert!((summary.environment.fuel_liters - expected_fuel).abs() < 1e-9);
    assert!((summary.environment.co2_kg - expected_fuel * 2.31).abs() < 1e-9);
}

#[test]
fn single_sample_is_not_applicable() {
    let raw = "0_Austin_LosAngeles\t2024-07-09 04:27:31.270921\t30.267115\t-97.743072";
    let journey = Journey::analyze(raw, &EngineConfig::default()).unwrap();
    assert_eq!(journey.summary.efficiency, None);
    assert_eq!(journey.route_efficiency().unwrap_err(), Error::DegenerateRoute);
    assert_eq!(journey.summary.total_distance_km, 0.0);
    assert_eq!(journey.summary.average_speed_kmh, 0.0);
}

#[test]
fn strict_by_default() {
    let raw = format!("{AUSTIN_TO_LA}oops\t2024-07-09 08:27:31.270921\t30.5\n");
    let err = Journey::analyze(&raw, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { line: 8, .. }), "{err}");

    let journey =
        Journey::analyze_with_mode(&raw, &EngineConfig::default(), ParseMode::Lenient).unwrap();
    assert_eq!(journey.records.len(), 6);
    assert_eq!(journey.skipped.len(), 1);

    assert_eq!(
        Journey::analyze("", &EngineConfig::default()).unwrap_err(),
        Error::EmptyJourney
    );
}

#[test]
fn config_is_validated_up_front() {
    let config = EngineConfig {
        nominal_interval_minutes: -10.0,
        ..Default::default()
    };
    assert_eq!(
        Journey::analyze(AUSTIN_TO_LA, &config).unwrap_err().code(),
        "invalid_config"
    );
}

#[test]
fn summary_serializes() {
    let journey = Journey::analyze(AUSTIN_TO_LA, &EngineConfig::default()).unwrap();
    let json = serde_json::to_value(&journey.summary).unwrap();
    assert_eq!(json["sample_count"], 6);
    assert_eq!(json["rush_hour"]["morning"], true);
    assert!(json["efficiency"]["ratio"].is_f64());
}
