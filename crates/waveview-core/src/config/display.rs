//! Persisted display-selection state for a channel

use serde::{Deserialize, Serialize};

use crate::display::DisplayKind;

/// Which display kinds a channel shows, and whether several may be shown
/// at once
///
/// This is the state a channel view is (lazily) built from. It is what the
/// surrounding application persists per project; the in-memory placement
/// fractions are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Enabled display kinds, in display order
    pub displays: Vec<DisplayKind>,
    /// Whether toggling a kind adds it alongside the others
    pub multi_view: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            displays: vec![DisplayKind::Waveform],
            multi_view: false,
        }
    }
}

impl DisplayConfig {
    /// Enabled kinds, never empty
    ///
    /// A channel must always show at least one sub-view; an empty or
    /// duplicated persisted list is repaired here rather than rejected.
    pub fn effective_displays(&self) -> Vec<DisplayKind> {
        let mut kinds: Vec<DisplayKind> = Vec::new();
        for &kind in &self.displays {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            log::warn!("display config lists no displays, falling back to waveform");
            kinds.push(DisplayKind::Waveform);
        }
        kinds
    }

    /// Whether a kind is enabled
    pub fn is_enabled(&self, kind: DisplayKind) -> bool {
        self.displays.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shows_waveform_only() {
        let config = DisplayConfig::default();
        assert_eq!(config.effective_displays(), vec![DisplayKind::Waveform]);
        assert!(!config.multi_view);
    }

    #[test]
    fn test_empty_display_list_is_repaired() {
        let config = DisplayConfig {
            displays: Vec::new(),
            multi_view: true,
        };
        assert_eq!(config.effective_displays(), vec![DisplayKind::Waveform]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let config = DisplayConfig {
            displays: vec![
                DisplayKind::Spectrogram,
                DisplayKind::Waveform,
                DisplayKind::Spectrogram,
            ],
            multi_view: true,
        };
        assert_eq!(
            config.effective_displays(),
            vec![DisplayKind::Spectrogram, DisplayKind::Waveform],
            "order of first occurrence is preserved"
        );
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = DisplayConfig {
            displays: vec![DisplayKind::Waveform, DisplayKind::Spectrogram],
            multi_view: true,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: DisplayConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
