//! [`Calculator`]-related definitions.

use derive_more::{Display, Error as StdError};

#[cfg(doc)]
use crate::domain::roi_model::{RoiCalculatorInput, RoiCalculatorOutput};

/// External ROI calculation service turning a [`RoiCalculatorInput`] into a
/// [`RoiCalculatorOutput`].
pub use common::Handler as Calculator;

/// [`Calculator`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// [`Calculator`] couldn't be reached.
    #[display("`Calculator` is unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),

    /// [`Calculator`] refused the provided [`RoiCalculatorInput`].
    #[display("`Calculator` rejected the input: {_0}")]
    Rejected(#[error(not(source))] String),
}
