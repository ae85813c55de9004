use minilad::prelude::*;
use minilad::rule_generator::random_rules::RandomParams;

use polars::prelude::*;


fn toy_sample() -> Sample {
    let x = Feature::numeric("x", vec![1.0, 2.0, 8.0, 9.0]);
    Sample::new(vec![x], &["A", "B"], vec![0, 0, 1, 1]).unwrap()
}


fn clouds() -> Sample {
    let x = vec![
        0.5, 1.0, 1.5, 2.0, 2.5, 6.0, 3.0,
        7.0, 7.5, 8.0, 8.5, 9.0, 2.2, 9.5,
    ];
    let y = vec![
        3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0,
        6.0, 5.0, 3.0, 5.0, 8.0, 9.0, 7.0,
    ];
    let target = vec![0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1];
    Sample::new(
        vec![Feature::numeric("x", x), Feature::numeric("y", y)],
        &["A", "B"],
        target,
    ).unwrap()
}


#[test]
fn separable_sample_is_learned() {
    let sample = toy_sample();
    let model = Lad::builder()
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    assert_eq!(model.cutpoints().len(), 1);
    assert!(model.diagnostics().is_empty());
    assert_eq!(model.predict_all(&sample), vec![0, 0, 1, 1]);
    assert_eq!(model.accuracy(&sample), 1.0);

    let manager = model.rule_manager();
    assert_eq!(manager.n_rules(0), 1);
    assert_eq!(manager.n_rules(1), 1);
    let rule = manager.rules_for(1).next().unwrap();
    assert_eq!(rule.to_string(), "{1} x > 5");
}


#[test]
fn unknown_value_falls_back_to_the_majority() {
    let x = Feature::numeric("x", vec![1.0, 2.0, 8.0, 9.0, 9.5]);
    let sample = Sample::new(vec![x], &["A", "B"], vec![0, 0, 1, 1, 1])
        .unwrap();
    let model = Lad::default().fit(&sample).unwrap();

    let x = Feature::numeric("x", vec![f64::NAN]);
    let query = Sample::new(vec![x], &["A", "B"], vec![0]).unwrap();

    assert_eq!(model.distribution(&query, 0), vec![0.0, 1.0]);
    assert_eq!(model.predict(&query, 0), 1);
}


#[test]
fn weights_are_normalized_per_class() {
    let sample = clouds();
    let model = Lad::builder()
        .minimum_purity(0.85)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    let manager = model.rule_manager();
    for label in 0..sample.n_classes() {
        if manager.n_rules(label) == 0 { continue; }
        let total = manager.rules_for(label)
            .map(|rule| rule.weight())
            .sum::<f64>();
        assert!((total - 1.0).abs() < 1e-9, "label {label}: {total}");
    }
    assert!(manager.rules().iter().all(|rule| rule.weight() > 0.0));
}


#[test]
fn invalid_parameters_are_rejected() {
    let result = Lad::builder().minimum_purity(0.3).build();
    assert!(matches!(result, Err(LadError::InvalidConfiguration(_))));

    let result = Lad::builder().cutpoint_tolerance(-1.0).build();
    assert!(matches!(result, Err(LadError::InvalidConfiguration(_))));

    let selection = FeatureSelection::IteratedSampling {
        separation_level: 1,
        n_rounds: 5,
        sample_size: 0.5,
        solution_size: 10,
        sample_cutpoints: true,
        seed: 0,
    };
    let result = Lad::builder().feature_selection(selection).build();
    assert!(matches!(result, Err(LadError::InvalidConfiguration(_))));

    let params = RandomParams { n_rules: 10, ..RandomParams::default() };
    let result = Lad::builder()
        .rule_generation(RuleGeneration::Random(params))
        .build();
    assert!(matches!(result, Err(LadError::InvalidConfiguration(_))));
}


#[test]
fn sample_without_signal_fails() {
    let x = Feature::numeric("x", vec![4.0, 4.0, 4.0, 4.0]);
    let sample = Sample::new(vec![x], &["A", "B"], vec![0, 0, 1, 1])
        .unwrap();

    let result = Lad::default().fit(&sample);
    assert!(matches!(result, Err(LadError::NoSignalFound)));
}


#[test]
fn infeasible_selection_keeps_every_cutpoint() {
    // Every pair is told apart by the two cutpoints, never by three.
    let x = Feature::numeric("x", vec![1.0, 2.0, 8.0, 9.0]);
    let y = Feature::numeric("y", vec![1.0, 2.0, 8.0, 9.0]);
    let sample = Sample::new(vec![x, y], &["A", "B"], vec![0, 0, 1, 1])
        .unwrap();
    let selection = FeatureSelection::GreedySetCover { separation_level: 3 };
    let model = Lad::builder()
        .feature_selection(selection)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    assert_eq!(model.cutpoints().len(), 2);
    assert_eq!(model.diagnostics().len(), 1);
    assert_eq!(model.diagnostics()[0].stage, "feature selection");
    assert_eq!(model.accuracy(&sample), 1.0);
}


#[test]
fn forced_cutpoint_meets_a_higher_level() {
    let sample = toy_sample();
    let selection = FeatureSelection::GreedySetCover { separation_level: 2 };
    let model = Lad::builder()
        .feature_selection(selection)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    assert!(model.diagnostics().is_empty());
    assert_eq!(model.cutpoints().len(), 1);
    assert_eq!(model.accuracy(&sample), 1.0);
}


#[test]
fn selection_can_be_disabled() {
    let sample = clouds();
    let all = Binarizer::default().fit(&sample).unwrap();

    let selection = FeatureSelection::GreedySetCover { separation_level: 0 };
    let model = Lad::builder()
        .feature_selection(selection)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    assert_eq!(model.cutpoints(), &all);
}


#[test]
fn dataframe_input() {
    let df = df!(
        "x" => &[1.0, 2.0, 8.0, 9.0, 1.5, 8.5],
        "color" => &["r", "g", "r", "g", "g", "r"]
    ).unwrap();
    let target = Series::new("class", &["no", "no", "yes", "yes", "no", "yes"]);
    let sample = Sample::from_dataframe(df, target).unwrap();

    let model = Lad::default().fit(&sample).unwrap();

    assert_eq!(model.accuracy(&sample), 1.0);
    assert_eq!(model.rule_manager().class_names(), sample.class_names());
}


#[test]
fn random_generation_is_reproducible() {
    let sample = clouds();
    let lad = Lad::builder()
        .feature_selection(FeatureSelection::iterated_sampling(1))
        .rule_generation(RuleGeneration::random())
        .build()
        .unwrap();

    let first = lad.fit(&sample).unwrap();
    let second = lad.fit(&sample).unwrap();

    assert_eq!(
        first.rule_manager().to_string(),
        second.rule_manager().to_string(),
    );
    assert_eq!(first.predict_all(&sample), second.predict_all(&sample));
}


#[test]
fn report_shows_cutpoints_and_patterns() {
    let sample = toy_sample();
    let model = Lad::default().fit(&sample).unwrap();
    let report = model.to_string();

    assert!(report.contains("Cutpoints: 1"));
    assert!(report.contains(" # Patterns class \"A\": 1"));
    assert!(report.contains(" # Patterns class \"B\": 1"));
    assert!(report.contains("x <= 5"));
}


#[test]
fn model_survives_a_json_round_trip() {
    let sample = clouds();
    let model = Lad::default().fit(&sample).unwrap();

    let path = std::env::temp_dir().join("minilad_model_test.json");
    model.save_json(&path).unwrap();
    let loaded = TrainedModel::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.cutpoints().len(), model.cutpoints().len());
    assert_eq!(loaded.rule_manager().rules().len(), model.rule_manager().rules().len());
    assert_eq!(loaded.predict_all(&sample), model.predict_all(&sample));
}


#[test]
fn config_reads_from_json() {
    let json = r#"{
        "cutpoint_tolerance": 0.0,
        "minimum_purity": 0.9,
        "feature_selection": { "GreedySetCover": { "separation_level": 1 } },
        "rule_generation": "MaxPatterns"
    }"#;
    let config = LadConfig::from_json(json).unwrap();
    assert_eq!(config.minimum_purity, 0.9);
    assert!(!config.verbose);

    let model = LadBuilder::from_config(config)
        .build()
        .unwrap()
        .fit(&toy_sample())
        .unwrap();
    assert_eq!(model.accuracy(&toy_sample()), 1.0);

    let negative = json.replace("\"separation_level\": 1", "\"separation_level\": -1");
    let result = LadConfig::from_json(negative);
    assert!(matches!(result, Err(LadError::Json(_))));
}
