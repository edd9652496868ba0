pub(crate) mod columns;
pub mod current_frame;
pub mod daily_frame;
pub mod hourly_frame;

use crate::types::fragment::FragmentKind;
use polars::prelude::DataFrame;

/// Behaviour shared by the three typed table wrappers.
///
/// Each implementor owns a polars `DataFrame` whose columns follow
/// [`FragmentKind::column_names`] for its [`WeatherFrame::KIND`].
pub trait WeatherFrame: Sized {
    const KIND: FragmentKind;

    /// Wraps a `DataFrame` assumed to have this kind's schema.
    fn from_frame(frame: DataFrame) -> Self;

    fn frame(&self) -> &DataFrame;

    /// A zero-row table with the full schema of this kind.
    fn empty() -> Self {
        Self::from_frame(DataFrame::empty_with_schema(&Self::KIND.schema()))
    }

    fn height(&self) -> usize {
        self.frame().height()
    }

    fn is_empty(&self) -> bool {
        self.height() == 0
    }
}
