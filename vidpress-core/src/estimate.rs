//! Output-size estimation from empirical compression ratios.
//!
//! The ratio table was measured against the h264_videotoolbox encoder across
//! the supported quality range. Ratios are relative output sizes in (0, 1]
//! and are non-decreasing with tier: higher quality keeps more of the input.

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Lowest supported quality tier.
pub const MIN_QUALITY_TIER: u8 = 40;
/// Highest supported quality tier.
pub const MAX_QUALITY_TIER: u8 = 70;

/// Empirical compression ratios, indexed by `tier - MIN_QUALITY_TIER`.
const QUALITY_RATIOS: [f64; 31] = [
    0.4481941579526197,  // 40
    0.4749733322576741,  // 41
    0.4749733322576741,  // 42
    0.4749733322576741,  // 43
    0.47585825211475663, // 44
    0.47585825211475663, // 45
    0.49937930657526214, // 46
    0.49937930657526214, // 47
    0.522379789788922,   // 48
    0.522379789788922,   // 49
    0.522379789788922,   // 50
    0.5568806427657994,  // 51
    0.5568806427657994,  // 52
    0.5686810907108213,  // 53
    0.5686810907108213,  // 54
    0.5912006670796293,  // 55
    0.5912006670796293,  // 56
    0.6296017034034428,  // 57
    0.6296017034034428,  // 58
    0.6296017034034428,  // 59
    0.6629754850286746,  // 60
    0.6629754850286746,  // 61
    0.6927821617586081,  // 62
    0.6927821617586081,  // 63
    0.7538019674953109,  // 64
    0.7538019674953109,  // 65
    0.7814097369250528,  // 66
    0.7814097369250528,  // 67
    0.8405114260070192,  // 68
    0.8405114260070192,  // 69
    0.8918438263191313,  // 70
];

/// A discrete quality tier selecting a pre-measured compression ratio.
///
/// Tiers are validated at construction, so every `QualityTier` value has an
/// entry in the ratio table. This is a distinct concept from
/// [`EncoderQuality`](crate::external::EncoderQuality), which is the numeric
/// knob passed straight to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QualityTier(u8);

impl QualityTier {
    /// Creates a tier, rejecting values outside the measured 40-70 range.
    pub fn new(tier: u8) -> CoreResult<Self> {
        if (MIN_QUALITY_TIER..=MAX_QUALITY_TIER).contains(&tier) {
            Ok(Self(tier))
        } else {
            Err(CoreError::UnknownQuality(tier.to_string()))
        }
    }

    /// The raw tier value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The measured compression ratio for this tier.
    #[must_use]
    pub fn ratio(self) -> f64 {
        QUALITY_RATIOS[usize::from(self.0 - MIN_QUALITY_TIER)]
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QualityTier {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let tier = s
            .parse::<u8>()
            .map_err(|_| CoreError::UnknownQuality(s.to_string()))?;
        Self::new(tier)
    }
}

/// Predicts the output size in bytes for an input of `original_size` bytes
/// encoded at `tier`. Linear in `original_size`.
#[must_use]
pub fn estimate_size(original_size: u64, tier: QualityTier) -> f64 {
    original_size as f64 * tier.ratio()
}
