use minilad::prelude::*;
use minilad::AttributeKind;

use polars::prelude::*;

use std::fs;


// Toy example (A/B are the class labels)
//
//   A  A                 B  B
// --+--+--------|--------+--+--> x
//   1  2        5        8  9
//
// Only the gap 2 <-> 8 is a class transition.
#[test]
fn single_transition() {
    let x = Feature::numeric("x", vec![1.0, 2.0, 8.0, 9.0]);
    let sample = Sample::new(vec![x], &["A", "B"], vec![0, 0, 1, 1])
        .unwrap();

    let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();

    assert_eq!(cutpoints.len(), 1);
    assert!((cutpoints.value_at(0) - 5.0).abs() < 1e-9);
    assert_eq!(cutpoints[0].name(), "x");
}


#[test]
fn disjoint_label_sets_are_always_cut() {
    let x = Feature::numeric("x", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let sample = Sample::new(
        vec![x], &["A", "B"], vec![0, 1, 0, 1, 0, 1]
    ).unwrap();

    let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();

    let values = cutpoints.iter().map(|c| c.value()).collect::<Vec<_>>();
    assert_eq!(values, vec![0.5, 1.5, 2.5, 3.5, 4.5]);
}


#[test]
fn nominal_attributes_get_a_single_cutpoint() {
    let x = Feature::numeric("x", vec![3.0; 4]);
    let c = Feature::nominal_from_strs(
        "color", &[Some("red"), Some("blue"), None, Some("red")]
    );
    let sample = Sample::new(vec![x, c], &["A", "B"], vec![0, 1, 0, 1])
        .unwrap();

    let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();

    assert_eq!(cutpoints.len(), 1);
    assert_eq!(cutpoints[0].kind(), AttributeKind::Nominal);
    assert_eq!(cutpoints[0].attribute(), 1);
    assert_eq!(cutpoints[0].n_categories(), 2);
    assert_eq!(cutpoints[0].category_name(1), Some("blue"));
}


#[test]
fn no_signal_is_an_error() {
    let x = Feature::numeric("x", vec![1.0, 1.0, 1.0]);
    let sample = Sample::new(vec![x], &["A", "B"], vec![0, 1, 0])
        .unwrap();

    let result = Binarizer::new(0.0).fit(&sample);
    assert!(matches!(result, Err(LadError::NoSignalFound)));
}


#[test]
fn report_lists_every_cutpoint() {
    let x = Feature::numeric("x", vec![1.0, 2.0, 8.0, 9.0]);
    let y = Feature::numeric("y", vec![0.0, 4.0, 0.0, 4.0]);
    let sample = Sample::new(vec![x, y], &["A", "B"], vec![0, 0, 1, 1])
        .unwrap();

    let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();
    let report = cutpoints.to_string();

    assert!(report.starts_with("Cutpoints: 2\n"));
    assert!(report.contains(" [ x : 5 ]"));
    assert!(report.contains(" [ y : 2 ]"));
}


#[test]
fn dataframe_columns_keep_their_kind() {
    let df = df!(
        "x" => &[1.0, 2.0, 8.0, 9.0],
        "c" => &["r", "r", "g", "g"]
    ).unwrap();
    let target = Series::new("class", &["A", "A", "B", "B"]);

    let sample = Sample::from_dataframe(df, target).unwrap();

    assert_eq!(sample.shape(), (4, 2));
    assert_eq!(sample.class_names(), &["A".to_string(), "B".to_string()]);
    assert!(sample["x"].is_numeric());
    assert!(!sample["c"].is_numeric());

    let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();
    assert_eq!(cutpoints.len(), 2);
}


#[test]
fn csv_missing_cells_are_read_as_missing() {
    let path = std::env::temp_dir().join("minilad_binarization_test.csv");
    fs::write(
        &path,
        "x,color,class\n\
        1.0,red,A\n\
        ?,red,A\n\
        8.0,,B\n\
        9.0,blue,B\n",
    ).unwrap();

    let sample = SampleReader::default()
        .file(&path)
        .has_header(true)
        .target_feature("class")
        .read()
        .unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(sample.shape(), (4, 2));
    assert_eq!(sample.target(), &[0, 0, 1, 1]);
    assert!(sample.is_missing(0, 1));
    assert!(sample.is_missing(1, 2));
    assert_eq!(sample["color"].n_categories(), 2);
}


#[test]
fn ragged_csv_is_rejected() {
    let path = std::env::temp_dir().join("minilad_ragged_test.csv");
    fs::write(&path, "x,class\n1.0,A\n2.0\n").unwrap();

    let result = SampleReader::default()
        .file(&path)
        .has_header(true)
        .target_feature("class")
        .read();
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(LadError::InvalidSample(_))));
}
