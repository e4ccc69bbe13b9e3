//! Gradual rollout sampling

use sha2::{Digest, Sha256};

/// Decides whether the current site takes part in a flag's rollout.
///
/// Implementations must be deterministic: the same site, flag name and
/// percentage always give the same answer.
pub trait RolloutOracle: Send + Sync {
    fn sample(&self, flag_name: &str, percentage: u8) -> bool;
}

impl<F> RolloutOracle for F
where
    F: Fn(&str, u8) -> bool + Send + Sync,
{
    fn sample(&self, flag_name: &str, percentage: u8) -> bool {
        self(flag_name, percentage)
    }
}

/// Oracle that never opts a site in
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRollout;

impl RolloutOracle for NoRollout {
    fn sample(&self, _flag_name: &str, _percentage: u8) -> bool {
        false
    }
}

/// Hash-bucketing oracle keyed by a stable site identity.
///
/// # Examples
///
/// ```
/// use flagwise_core::{RolloutOracle, SiteSampler};
///
/// let sampler = SiteSampler::new("my-site");
/// let first = sampler.sample("FAST_DEV", 30);
/// assert_eq!(first, sampler.sample("FAST_DEV", 30));
/// ```
#[derive(Debug, Clone)]
pub struct SiteSampler {
    site_id: String,
}

impl SiteSampler {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Bucket (0-99) this site falls into for a flag
    pub fn bucket(&self, flag_name: &str) -> u8 {
        Self::calculate_bucket(flag_name, &self.site_id)
    }

    fn calculate_bucket(flag_name: &str, site_id: &str) -> u8 {
        let mut hasher = Sha256::new();
        hasher.update(flag_name.as_bytes());
        hasher.update(site_id.as_bytes());
        let digest = hasher.finalize();

        // First two bytes (0-65535) mapped to 0-99
        let value = u32::from(u16::from_be_bytes([digest[0], digest[1]]));
        (value * 100 / 65_536) as u8
    }
}

impl RolloutOracle for SiteSampler {
    fn sample(&self, flag_name: &str, percentage: u8) -> bool {
        self.bucket(flag_name) < percentage.min(100)
    }
}
