//! Display kinds for channel sub-views

use serde::{Deserialize, Serialize};

/// Number of built-in display kinds
pub const NUM_DISPLAY_KINDS: usize = 2;

/// Stable tag identifying what a sub-view renders
///
/// Persisted in the display configuration and used as the registry key for
/// sub-view construction, so the discriminants must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum DisplayKind {
    Waveform = 0,
    Spectrogram = 1,
}

impl DisplayKind {
    /// All built-in display kinds in menu order
    pub const ALL: [DisplayKind; NUM_DISPLAY_KINDS] =
        [DisplayKind::Waveform, DisplayKind::Spectrogram];

    /// Convert from index (0-1) to DisplayKind
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(DisplayKind::Waveform),
            1 => Some(DisplayKind::Spectrogram),
            _ => None,
        }
    }

    /// Menu label for this display kind
    pub fn name(&self) -> &'static str {
        match self {
            DisplayKind::Waveform => "Waveform",
            DisplayKind::Spectrogram => "Spectrogram",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_round_trips() {
        for kind in DisplayKind::ALL {
            assert_eq!(DisplayKind::from_index(kind as usize), Some(kind));
        }
        assert_eq!(DisplayKind::from_index(NUM_DISPLAY_KINDS), None);
    }
}
