use crate::binary::BinaryData;
use crate::error::Result;


/// The trait [`FeatureSelector`] defines the contract of
/// the cutpoint selection stage.
///
/// # Required Methods
/// - [`FeatureSelector::name`]
/// - [`FeatureSelector::separation_level`]
/// - [`FeatureSelector::select`]
/// - [`FeatureSelector::info`] ... optional.
pub trait FeatureSelector {
    /// Returns the name of the selector.
    fn name(&self) -> &str;


    /// Returns the parameters of the selector.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Number of selected cutpoints that must separate
    /// every pair of differently labeled instances.
    /// `0` disables the selection.
    fn separation_level(&self) -> usize;


    /// Returns the indices of the selected cutpoints
    /// in ascending order.
    ///
    /// A selector with separation level `0` returns every index.
    /// Randomized selectors re-seed at every call.
    fn select(&self, data: &BinaryData<'_>) -> Result<Vec<usize>>;
}
