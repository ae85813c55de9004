use minilad::prelude::*;


// Two interleaved clouds on `x`, with `y` as noise.
fn clouds() -> (Sample, CutpointSet) {
    let x = vec![
        0.5, 1.0, 1.5, 2.0, 2.5, 6.0, 3.0,
        7.0, 7.5, 8.0, 8.5, 9.0, 2.2, 9.5,
    ];
    let y = vec![
        3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0,
        6.0, 5.0, 3.0, 5.0, 8.0, 9.0, 7.0,
    ];
    let target = vec![0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1];
    let sample = Sample::new(
        vec![Feature::numeric("x", x), Feature::numeric("y", y)],
        &["A", "B"],
        target,
    ).unwrap();
    let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();
    (sample, cutpoints)
}


/// Purity of `rule` measured directly on `data`.
fn measured_purity(rule: &BinaryRule, data: &BinaryData<'_>) -> f64 {
    let covered = data.iter()
        .filter(|instance| rule.covers(instance))
        .collect::<Vec<_>>();
    let own = covered.iter()
        .filter(|instance| instance.label() == rule.label())
        .count();
    own as f64 / covered.len() as f64
}


#[test]
fn max_patterns_respect_the_purity_floor() {
    let (sample, cutpoints) = clouds();
    let data = BinaryData::new(&sample, &cutpoints);

    let mut generator = MaxPatterns::new(0.85);
    generator.fit(&data).unwrap();

    let rules = generator.rules();
    assert!(!rules.is_empty());
    for rule in rules {
        assert!(!rule.is_empty());
        assert!(rule.purity() >= 0.85, "{rule}");
        assert!((measured_purity(rule, &data) - rule.purity()).abs() < 1e-9);
    }
}


#[test]
fn random_rules_respect_the_purity_floor() {
    let (sample, cutpoints) = clouds();
    let data = BinaryData::new(&sample, &cutpoints);

    let mut generator = RandomRules::new(0.85)
        .n_rules(30)
        .n_random_features(3);
    generator.fit(&data).unwrap();

    let rules = generator.rules();
    assert!(!rules.is_empty());
    for rule in rules {
        assert!(rule.purity() >= 0.85, "{rule}");
        assert!((measured_purity(rule, &data) - rule.purity()).abs() < 1e-9);
    }
}


#[test]
fn random_rules_are_reproducible() {
    let (sample, cutpoints) = clouds();
    let data = BinaryData::new(&sample, &cutpoints);

    let mut first = RandomRules::new(0.9).n_rules(25).seed(11);
    let mut second = RandomRules::new(0.9).n_rules(25).seed(11);
    first.fit(&data).unwrap();
    second.fit(&data).unwrap();

    assert_eq!(first.rules(), second.rules());
}


#[test]
fn refitting_discards_previous_rules() {
    let (sample, cutpoints) = clouds();
    let data = BinaryData::new(&sample, &cutpoints);

    let mut generator = MaxPatterns::new(0.85);
    generator.fit(&data).unwrap();
    let n_rules = generator.rules().len();

    generator.fit(&data).unwrap();
    assert_eq!(generator.rules().len(), n_rules);

    let taken = generator.take_rules();
    assert_eq!(taken.len(), n_rules);
    assert!(generator.rules().is_empty());
}
