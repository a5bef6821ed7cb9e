//! Train/test dataset split.

use serde::{Deserialize, Serialize};

/// Which half of the dataset a case belongs to.
///
/// The split picks the input-generation prompt variant and tags every
/// exported summary row.
///
/// # Examples
///
/// ```
/// use stepforge_core::DatasetSplit;
/// use std::str::FromStr;
///
/// assert_eq!(DatasetSplit::from_str("test").unwrap(), DatasetSplit::Test);
/// assert_eq!(DatasetSplit::Train.to_string(), "train");
///
/// // With test_every = 4, cases 3, 7, 11, ... (zero-based) are test cases.
/// assert_eq!(DatasetSplit::for_case(3, 4), DatasetSplit::Test);
/// assert_eq!(DatasetSplit::for_case(4, 4), DatasetSplit::Train);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DatasetSplit {
    /// Training data
    #[default]
    Train,
    /// Held-out test data
    Test,
}

impl DatasetSplit {
    /// Split for the zero-based case `index` when every `test_every`-th case is a test case.
    ///
    /// A `test_every` of zero disables test cases.
    pub fn for_case(index: usize, test_every: usize) -> Self {
        if test_every > 0 && (index + 1) % test_every == 0 {
            DatasetSplit::Test
        } else {
            DatasetSplit::Train
        }
    }
}
