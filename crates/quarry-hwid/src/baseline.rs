//! Oldest-supported-baseline policy.
//!
//! Maps a platform version to the oldest microarchitecture builds should
//! target by default. The policy knows one cutover; the "generic oldest"
//! symbol for platforms below it is defined elsewhere and supplied by the
//! caller.

use semver::Version;

use crate::microarch::Microarch;

/// First platform version whose default baseline is [`Microarch::Nehalem`].
pub fn modern_baseline_cutover() -> Version {
    Version::new(10, 12, 0)
}

/// Oldest microarchitecture a build should target on `version`.
///
/// Pure function: versions at or above the cutover yield the modern
/// baseline, anything below delegates to the caller-supplied generic
/// baseline.
pub fn oldest_supported(version: &Version, generic: Microarch) -> Microarch {
    if *version >= modern_baseline_cutover() {
        Microarch::Nehalem
    } else {
        generic
    }
}
