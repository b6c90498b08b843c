// View module
// Calendar view mode and the generation token guarding async callbacks

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Day,
    Month,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Month => "Month",
        }
    }
}

/// Generation of a mounted view.
///
/// Work started under an older token is discarded when it reports back.
/// Gesture tokens advance on every mode switch and on teardown; the token
/// guarding fetches advances only on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ViewToken(u64);

impl ViewToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}
