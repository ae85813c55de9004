use std::fmt;

use super::binary_instance::BinaryInstance;


/// One atomic test against a cutpoint.
///
/// `Numeric { sign: true }` reads "above the threshold",
/// `Numeric { sign: false }` reads "at or below the threshold".
/// Literals are equal iff they share the cutpoint index and the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
    /// Threshold test on a numeric cutpoint.
    Numeric {
        /// Cutpoint index.
        index: usize,
        /// `true` for `value > threshold`.
        sign: bool,
    },
    /// Equality test on a nominal cutpoint.
    Nominal {
        /// Cutpoint index.
        index: usize,
        /// Category index.
        value: usize,
    },
}


impl Literal {
    /// The literal of the `index`-th cutpoint satisfied by `instance`.
    /// Returns `None` if the value is missing.
    pub fn from_instance(instance: &BinaryInstance<'_>, index: usize)
        -> Option<Self>
    {
        if instance.is_numeric(index) {
            instance.bin_at(index)
                .map(|sign| Self::Numeric { index, sign })
        } else {
            instance.value_at(index)
                .map(|value| Self::Nominal { index, value })
        }
    }


    /// Cutpoint index of this literal.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::Numeric { index, .. } => *index,
            Self::Nominal { index, .. } => *index,
        }
    }


    /// Returns `true` if this literal tests a numeric cutpoint.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }


    /// Evaluate this literal on `instance`.
    /// Returns `None` if the tested value is missing.
    #[inline]
    pub fn holds(&self, instance: &BinaryInstance<'_>) -> Option<bool> {
        match *self {
            Self::Numeric { index, sign } => {
                instance.bin_at(index).map(|bin| bin == sign)
            },
            Self::Nominal { index, value } => {
                instance.value_at(index).map(|v| v == value)
            },
        }
    }
}


impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { index, sign: true } => write!(f, "b{index}"),
            Self::Numeric { index, sign: false } => write!(f, "!b{index}"),
            Self::Nominal { index, value } => write!(f, "b{index}={value}"),
        }
    }
}
