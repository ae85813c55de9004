use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::{LadError, Result};


/// Dense representation of a numeric attribute.
/// Missing values are stored as `f64::NAN`.
#[derive(Debug,Clone)]
pub struct NumericFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<f64>,
}


/// Dense representation of a nominal attribute.
#[derive(Debug,Clone)]
pub struct NominalFeature {
    /// Feature name
    pub name: String,
    /// Category names. The `k`-th name corresponds to the value `k`.
    pub categories: Vec<String>,
    /// Category indices, `None` for a missing value.
    pub sample: Vec<Option<usize>>,
}


/// The kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Continuous attribute, tested by thresholds.
    Numeric,
    /// Categorical attribute, tested by equality.
    Nominal,
}


/// An enumeration of numeric/nominal feature.
#[derive(Debug,Clone)]
pub enum Feature {
    /// Numeric feature
    Numeric(NumericFeature),
    /// Nominal feature
    Nominal(NominalFeature),
}


impl Feature {
    /// Construct a numeric feature from the given values.
    /// `f64::NAN` is treated as a missing value.
    pub fn numeric<T, V>(name: T, values: V) -> Self
        where T: ToString,
              V: Into<Vec<f64>>,
    {
        Self::Numeric(NumericFeature {
            name: name.to_string(),
            sample: values.into(),
        })
    }


    /// Construct a nominal feature from category names and
    /// category indices.
    pub fn nominal<T, S>(
        name: T,
        categories: &[S],
        values: Vec<Option<usize>>,
    ) -> Self
        where T: ToString,
              S: ToString,
    {
        Self::Nominal(NominalFeature {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            sample: values,
        })
    }


    /// Construct a nominal feature from raw strings.
    /// Categories are numbered in order of first appearance.
    pub fn nominal_from_strs<T, S>(name: T, values: &[Option<S>]) -> Self
        where T: ToString,
              S: AsRef<str>,
    {
        let mut feature = NominalFeature::new(name);
        values.iter()
            .for_each(|v| feature.append(v.as_ref().map(|s| s.as_ref())));
        Self::Nominal(feature)
    }


    /// Convert a `polars::Series` into a `Feature`.
    /// Numeric dtypes become numeric features, any other dtype is
    /// read as strings and becomes a nominal feature.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name().to_string();
        if series.dtype().is_numeric() {
            let casted = series.cast(&DataType::Float64)?;
            let sample = casted.f64()?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect::<Vec<_>>();
            Ok(Self::Numeric(NumericFeature { name, sample }))
        } else {
            let casted = series.cast(&DataType::Utf8)?;
            let mut feature = NominalFeature::new(name);
            casted.utf8()?
                .into_iter()
                .for_each(|v| feature.append(v));
            Ok(Self::Nominal(feature))
        }
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric(feat) => &feat.name,
            Self::Nominal(feat) => &feat.name,
        }
    }


    /// Returns the kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Numeric(_) => AttributeKind::Numeric,
            Self::Nominal(_) => AttributeKind::Nominal,
        }
    }


    /// Returns `true` if this feature is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }


    /// Returns the number of categories of a nominal feature,
    /// `0` for a numeric one.
    pub fn n_categories(&self) -> usize {
        match self {
            Self::Numeric(_) => 0,
            Self::Nominal(feat) => feat.categories.len(),
        }
    }


    /// Returns the name of the `k`-th category.
    pub fn category_name(&self, k: usize) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Nominal(feat) => feat.categories.get(k).map(|s| &s[..]),
        }
    }


    /// Returns the value at `row`.
    /// Nominal values are returned as category indices.
    #[inline]
    pub fn value(&self, row: usize) -> Option<f64> {
        match self {
            Self::Numeric(feat) => {
                let v = feat.sample[row];
                if v.is_nan() { None } else { Some(v) }
            },
            Self::Nominal(feat) => feat.sample[row].map(|v| v as f64),
        }
    }


    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(feat) => feat.sample.len(),
            Self::Nominal(feat) => feat.sample.len(),
        }
    }


    /// Returns `true` if the number of examples is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    pub(super) fn check(&self) -> Result<()> {
        if let Self::Nominal(feat) = self {
            let n_categories = feat.categories.len();
            let out_of_range = feat.sample.iter()
                .flatten()
                .any(|&v| v >= n_categories);
            if out_of_range {
                let message = format!(
                    "feature `{}` has a value outside of its {n_categories} \
                    categories",
                    feat.name,
                );
                return Err(LadError::InvalidSample(message));
            }
        }
        Ok(())
    }


    pub(super) fn into_target(self) -> Result<(Vec<String>, Vec<usize>)> {
        let feat = match self {
            Self::Nominal(feat) => feat,
            Self::Numeric(feat) => NominalFeature::from_numeric(feat),
        };
        let NominalFeature { name, categories, sample } = feat;
        let target = sample.into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                let message = format!("class `{name}` has a missing value");
                LadError::InvalidSample(message)
            })?;
        Ok((categories, target))
    }
}


impl NumericFeature {
    /// Construct an empty numeric feature.
    pub fn new<T: ToString>(name: T) -> Self {
        Self { name: name.to_string(), sample: Vec::new(), }
    }
}


impl NominalFeature {
    /// Construct an empty nominal feature.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            categories: Vec::new(),
            sample: Vec::new(),
        }
    }


    /// Append a raw value. Unseen strings become new categories.
    pub fn append(&mut self, value: Option<&str>) {
        let index = value.map(|v| {
            match self.categories.iter().position(|c| c == v) {
                Some(k) => k,
                None => {
                    self.categories.push(v.to_string());
                    self.categories.len() - 1
                },
            }
        });
        self.sample.push(index);
    }


    /// Re-read a numeric column as categories.
    fn from_numeric(feature: NumericFeature) -> Self {
        let mut nominal = Self::new(feature.name);
        for v in feature.sample {
            let v = if v.is_nan() { None } else { Some(v.to_string()) };
            nominal.append(v.as_deref());
        }
        nominal
    }
}
