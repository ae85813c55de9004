use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use super::feature_struct::*;
use crate::error::{LadError, Result};


const MISSING_TOKEN: &str = "?";


/// Struct `Sample` holds a labeled batch sample.
/// The class attribute is kept apart from the features
/// as a vector of label indices.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) class_names: Vec<String>,
    pub(super) target: Vec<usize>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a new `Sample` from features, class names,
    /// and the label index of each row.
    pub fn new<S: ToString>(
        features: Vec<Feature>,
        class_names: &[S],
        target: Vec<usize>,
    ) -> Result<Self>
    {
        let class_names = class_names.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        Self::from_parts(features, class_names, target)
    }


    fn from_parts(
        features: Vec<Feature>,
        class_names: Vec<String>,
        target: Vec<usize>,
    ) -> Result<Self>
    {
        let n_sample = target.len();
        let n_feature = features.len();

        if n_sample == 0 {
            let message = "the sample has no example".to_string();
            return Err(LadError::InvalidSample(message));
        }
        if class_names.len() < 2 {
            let message = format!(
                "the class attribute needs at least 2 labels, got {}",
                class_names.len()
            );
            return Err(LadError::InvalidSample(message));
        }
        if let Some(&y) = target.iter().find(|&&y| y >= class_names.len()) {
            let message = format!("label index {y} has no class name");
            return Err(LadError::InvalidSample(message));
        }
        for feature in features.iter() {
            if feature.len() != n_sample {
                let message = format!(
                    "feature `{}` has {} values, expected {n_sample}",
                    feature.name(),
                    feature.len(),
                );
                return Err(LadError::InvalidSample(message));
            }
            feature.check()?;
        }

        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let sample = Self {
            name_to_index,
            features,
            class_names,
            target,
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    /// The target series is always read as a nominal attribute.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let features = data.get_columns()
            .par_iter()
            .map(Feature::from_series)
            .collect::<Result<Vec<_>>>()?;

        let (class_names, target) = Feature::from_series(&target)?
            .into_target()?;

        Self::from_parts(features, class_names, target)
    }


    /// Read a CSV format file to `Sample` type.
    /// The returned sample has no target;
    /// call [`Sample::set_target`] afterwards.
    ///
    /// Empty cells and `?` are read as missing values.
    /// A column is numeric if every non-missing cell parses as `f64`.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines();

        let mut names = Vec::new();
        if has_header {
            if let Some(line) = lines.next() {
                names = line?.split(',')
                    .map(|name| name.trim().to_string())
                    .collect::<Vec<_>>();
            }
        }

        let mut columns: Vec<Vec<String>> = Vec::new();
        for (k, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|x| x.trim().to_string())
                .collect::<Vec<_>>();

            if columns.is_empty() {
                columns = vec![Vec::new(); cells.len()];
            }
            if cells.len() != columns.len() {
                let message = format!(
                    "line {} has {} cells, expected {}",
                    k + 1,
                    cells.len(),
                    columns.len(),
                );
                return Err(LadError::InvalidSample(message));
            }
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
        }

        // if the header does not exist,
        // construct a dummy header.
        if names.len() != columns.len() {
            names = (1..=columns.len())
                .map(|i| format!("Feat. [{i}]"))
                .collect();
        }

        let features = names.into_par_iter()
            .zip(columns)
            .map(|(name, column)| column_to_feature(name, column))
            .collect::<Vec<_>>();

        let n_sample = features.first().map(|f| f.len()).unwrap_or(0);
        let n_feature = features.len();
        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let sample = Self {
            name_to_index,
            features,
            class_names: Vec::new(),
            target: Vec::new(),
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Set the feature of name `target` to the class attribute.
    /// The old target will be dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| {
                let message = format!("the target `{target}` does not exist");
                LadError::InvalidSample(message)
            })?;

        let (class_names, target) = self.features.remove(pos)
            .into_target()?;

        Self::from_parts(self.features, class_names, target)
    }


    /// Returns the label index of every example.
    pub fn target(&self) -> &[usize] {
        &self.target[..]
    }


    /// Returns the label index of the `row`-th example.
    #[inline]
    pub fn label(&self, row: usize) -> usize {
        self.target[row]
    }


    /// Returns the class names.
    pub fn class_names(&self) -> &[String] {
        &self.class_names[..]
    }


    /// Returns the number of class labels.
    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }


    /// Returns the number of examples of each class label.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0_usize; self.n_classes()];
        self.target.iter()
            .for_each(|&y| { counts[y] += 1; });
        counts
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the `attribute`-th feature.
    #[inline]
    pub fn feature(&self, attribute: usize) -> &Feature {
        &self.features[attribute]
    }


    /// Returns the value of `attribute` at `row`.
    /// Nominal values are returned as category indices.
    #[inline]
    pub fn value(&self, attribute: usize, row: usize) -> Option<f64> {
        self.features[attribute].value(row)
    }


    /// Returns `true` if the value of `attribute` at `row` is missing.
    #[inline]
    pub fn is_missing(&self, attribute: usize, row: usize) -> bool {
        self.value(attribute, row).is_none()
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }
}


fn column_to_feature(name: String, column: Vec<String>) -> Feature {
    let is_missing = |cell: &str| cell.is_empty() || cell == MISSING_TOKEN;

    let numeric = column.iter()
        .filter(|cell| !is_missing(cell.as_str()))
        .all(|cell| cell.parse::<f64>().is_ok());

    if numeric {
        let sample = column.iter()
            .map(|cell| cell.parse::<f64>().unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        Feature::Numeric(NumericFeature { name, sample })
    } else {
        let mut feature = NominalFeature::new(name);
        column.iter()
            .for_each(|cell| {
                let cell = cell.as_str();
                let cell = if is_missing(cell) { None } else { Some(cell) };
                feature.append(cell);
            });
        Feature::Nominal(feature)
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature `{name}` does not exist"));
        &self.features[k]
    }
}
