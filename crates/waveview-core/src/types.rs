//! Common types for Waveview
//!
//! Fundamental identifiers and units shared by the channel display model
//! and the widget crates.

/// Default sample rate assumed for new clips (48kHz - standard professional
/// audio rate). Clips carry their own rate; this is only the default.
pub const SAMPLE_RATE: u32 = 48000;

/// Position or count of audio samples within one clip
///
/// Sample indices produced by the display core are clip-relative and already
/// clamped to the clip bounds, so an unsigned count is sufficient.
pub type SampleCount = u64;

/// Identity of an audio clip, used for hit-test equality
///
/// Clip contents live in the surrounding project model; the display core
/// only ever compares and forwards these ids.
pub type ClipId = u64;

/// Identity of the channel a view is attached to
///
/// A channel view keeps this as a back-reference only; it never owns the
/// channel object.
pub type ChannelId = u64;
