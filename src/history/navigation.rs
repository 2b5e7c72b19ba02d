//! History navigation state for one prompt.

/// Where the prompt is within history.
///
/// The draft is captured on the first step away from `Idle` and travels with
/// the state, so stepping back to `Idle` always hands back exactly that draft.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Navigation {
    #[default]
    Idle,
    At { index: usize, draft: String },
}

impl Navigation {
    pub fn index(&self) -> Option<usize> {
        match self {
            Navigation::Idle => None,
            Navigation::At { index, .. } => Some(*index),
        }
    }

    /// Move to `index`, keeping an existing draft or capturing `current`.
    pub(super) fn step_to(self, index: usize, current: &str) -> Self {
        let draft = match self {
            Navigation::Idle => current.to_string(),
            Navigation::At { draft, .. } => draft,
        };
        Navigation::At { index, draft }
    }

    pub(super) fn into_parts(self) -> Option<(usize, String)> {
        match self {
            Navigation::Idle => None,
            Navigation::At { index, draft } => Some((index, draft)),
        }
    }
}
