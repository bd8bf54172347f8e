//! Audio clip records
//!
//! A [`Clip`] is the minimal description of a placed piece of audio that the
//! display core needs: where it sits on the timeline, how many samples it
//! holds, and at what rate. Sample data itself lives elsewhere and is only
//! reachable through rendering collaborators.

use serde::{Deserialize, Serialize};

use crate::types::{ClipId, SampleCount, SAMPLE_RATE};

/// A clip placed on a channel timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Stable identity, used for hit-test equality
    pub id: ClipId,
    /// Start time on the channel timeline, in seconds
    pub offset: f64,
    /// Sample rate of the clip audio, in Hz
    pub rate: f64,
    /// Number of samples in the clip
    pub num_samples: SampleCount,
    /// Display name
    pub name: String,
    /// Optional display tint
    pub color: Option<(u8, u8, u8)>,
}

impl Clip {
    /// Create a clip with the given placement and length
    pub fn new(id: ClipId, offset: f64, rate: f64, num_samples: SampleCount) -> Self {
        Self {
            id,
            offset,
            rate: if rate > 0.0 { rate } else { SAMPLE_RATE as f64 },
            num_samples,
            name: String::new(),
            color: None,
        }
    }

    /// Start time on the timeline, in seconds
    #[inline]
    pub fn start(&self) -> f64 {
        self.offset
    }

    /// End time on the timeline, in seconds
    #[inline]
    pub fn end(&self) -> f64 {
        self.offset + self.duration()
    }

    /// Length of the clip, in seconds
    #[inline]
    pub fn duration(&self) -> f64 {
        if self.rate > 0.0 {
            self.num_samples as f64 / self.rate
        } else {
            0.0
        }
    }

    /// Whether a timeline position falls inside the clip
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start() && t < self.end()
    }

    /// Convert an absolute timeline position to a clip-relative sample index
    ///
    /// Rounds to the nearest sample and clamps to `[0, num_samples]`. Both
    /// drawing and hit-testing go through this conversion so the selection
    /// they agree on is identical down to the sample.
    pub fn to_sample(&self, t: f64) -> SampleCount {
        let local = ((t - self.offset) * self.rate + 0.5).floor();
        if local <= 0.0 {
            0
        } else {
            (local as SampleCount).min(self.num_samples)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_bounds() {
        let clip = Clip::new(1, 2.0, 1000.0, 4000);
        assert_eq!(clip.start(), 2.0);
        assert_eq!(clip.end(), 6.0);
        assert_eq!(clip.duration(), 4.0);
        assert!(clip.contains(2.0));
        assert!(clip.contains(5.999));
        assert!(!clip.contains(6.0), "end is exclusive");
    }

    #[test]
    fn test_to_sample_rounds_to_nearest() {
        let clip = Clip::new(1, 0.0, 1000.0, 1000);
        assert_eq!(clip.to_sample(0.0004), 0);
        assert_eq!(clip.to_sample(0.0006), 1);
        assert_eq!(clip.to_sample(0.5), 500);
    }

    #[test]
    fn test_to_sample_clamps_to_clip() {
        let clip = Clip::new(1, 1.0, 1000.0, 1000);
        assert_eq!(clip.to_sample(-5.0), 0, "before the clip clamps to 0");
        assert_eq!(
            clip.to_sample(20.0),
            1000,
            "past the clip clamps to num_samples"
        );
    }

    #[test]
    fn test_zero_rate_is_degenerate_not_fatal() {
        let clip = Clip {
            rate: 0.0,
            ..Clip::new(1, 0.0, 1000.0, 1000)
        };
        assert_eq!(clip.duration(), 0.0);
        assert_eq!(clip.to_sample(1.0), 0);
    }
}
