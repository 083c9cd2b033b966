//! Microarchitecture symbols and the family/model classification table.
//!
//! The table is a many-to-one mapping reverse-engineered from vendor
//! documentation: several model numbers are hardware revisions of the same
//! design and share a symbol. It is append-only; silicon it does not know
//! classifies to [`Microarch::Unknown`] rather than failing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A processor design generation, used to select compiler tuning flags.
///
/// Equality of [`Microarch::Unknown`] values is over the raw integers, not
/// over their formatted text, so distinct unrecognized processors never
/// collide with a known symbol or with each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Microarch {
    /// Whatever the running host is; resolved by the compiler itself.
    Native,
    Core,
    Core2,
    Dothan,
    Merom,
    Penryn,
    Atom,
    Nehalem,
    Westmere,
    Sandybridge,
    Ivybridge,
    Haswell,
    Broadwell,
    Skylake,
    Prescott,
    Presler,
    Armv7,
    Armv8,
    /// ARM-class processor not further distinguished.
    Arm,
    /// PowerPC-class processor.
    Ppc,
    /// Architecture class outside the ones this table covers.
    Dunno,
    /// Intel-compatible silicon absent from the classification table.
    Unknown { family: u32, model: u32 },
}

impl fmt::Display for Microarch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Microarch::Native => f.write_str("native"),
            Microarch::Core => f.write_str("core"),
            Microarch::Core2 => f.write_str("core2"),
            Microarch::Dothan => f.write_str("dothan"),
            Microarch::Merom => f.write_str("merom"),
            Microarch::Penryn => f.write_str("penryn"),
            Microarch::Atom => f.write_str("atom"),
            Microarch::Nehalem => f.write_str("nehalem"),
            Microarch::Westmere => f.write_str("westmere"),
            Microarch::Sandybridge => f.write_str("sandybridge"),
            Microarch::Ivybridge => f.write_str("ivybridge"),
            Microarch::Haswell => f.write_str("haswell"),
            Microarch::Broadwell => f.write_str("broadwell"),
            Microarch::Skylake => f.write_str("skylake"),
            Microarch::Prescott => f.write_str("prescott"),
            Microarch::Presler => f.write_str("presler"),
            Microarch::Armv7 => f.write_str("armv7"),
            Microarch::Armv8 => f.write_str("armv8"),
            Microarch::Arm => f.write_str("arm"),
            Microarch::Ppc => f.write_str("ppc"),
            Microarch::Dunno => f.write_str("dunno"),
            Microarch::Unknown { family, model } => {
                write!(f, "unknown_0x{family:x}_0x{model:x}")
            }
        }
    }
}

/// Classify an Intel-compatible `(cpu family, model)` pair.
///
/// Only families `0x06` and `0x0f` have table entries; everything else,
/// and unlisted models within a known family, yields
/// [`Microarch::Unknown`] carrying both numbers.
pub(crate) fn classify(family: u32, model: u32) -> Microarch {
    match (family, model) {
        (0x06, 0x0d) => Microarch::Dothan,
        (0x06, 0x0f | 0x16) => Microarch::Merom,
        (0x06, 0x17 | 0x1d) => Microarch::Penryn,
        (0x06, 0x1c | 0x26 | 0x36) => Microarch::Atom,
        (0x06, 0x1a | 0x1e | 0x2e) => Microarch::Nehalem,
        (0x06, 0x25 | 0x2c | 0x2f) => Microarch::Westmere,
        (0x06, 0x2a | 0x2d) => Microarch::Sandybridge,
        (0x06, 0x3a | 0x3e) => Microarch::Ivybridge,
        (0x06, 0x3c | 0x3f | 0x46) => Microarch::Haswell,
        (0x06, 0x3d | 0x47 | 0x4f | 0x56) => Microarch::Broadwell,
        (0x06, 0x4e | 0x55 | 0x5e | 0x8e | 0x9e) => Microarch::Skylake,
        (0x0f, 0x03 | 0x04) => Microarch::Prescott,
        (0x0f, 0x06) => Microarch::Presler,
        (family, model) => Microarch::Unknown { family, model },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_family_6_models() {
        assert_eq!(classify(0x06, 0x3a), Microarch::Ivybridge);
        assert_eq!(classify(0x06, 0x3e), Microarch::Ivybridge);
        assert_eq!(classify(0x06, 0x2a), Microarch::Sandybridge);
        assert_eq!(classify(0x06, 0x1a), Microarch::Nehalem);
        assert_eq!(classify(0x06, 0x1c), Microarch::Atom);
        assert_eq!(classify(0x06, 0x9e), Microarch::Skylake);
        assert_eq!(classify(0x06, 0x0d), Microarch::Dothan);
    }

    #[test]
    fn known_family_f_models() {
        assert_eq!(classify(0x0f, 0x03), Microarch::Prescott);
        assert_eq!(classify(0x0f, 0x04), Microarch::Prescott);
        assert_eq!(classify(0x0f, 0x06), Microarch::Presler);
    }

    #[test]
    fn unlisted_model_in_known_family() {
        assert_eq!(
            classify(0x06, 0xff),
            Microarch::Unknown {
                family: 0x06,
                model: 0xff
            }
        );
    }

    #[test]
    fn unlisted_family() {
        assert_eq!(
            classify(0x07, 0x3a),
            Microarch::Unknown {
                family: 0x07,
                model: 0x3a
            }
        );
    }

    #[test]
    fn unknown_display_is_lowercase_hex() {
        let m = Microarch::Unknown {
            family: 0x06,
            model: 0xff,
        };
        assert_eq!(m.to_string(), "unknown_0x6_0xff");
        let m = Microarch::Unknown {
            family: 0x1a,
            model: 0x02,
        };
        assert_eq!(m.to_string(), "unknown_0x1a_0x2");
    }

    #[test]
    fn unknown_equality_is_over_integers() {
        let a = Microarch::Unknown { family: 6, model: 255 };
        let b = Microarch::Unknown { family: 0x06, model: 0xff };
        assert_eq!(a, b);
        assert_ne!(a, Microarch::Unknown { family: 6, model: 254 });
        assert_ne!(a, Microarch::Skylake);
    }

    #[test]
    fn named_symbols_display() {
        assert_eq!(Microarch::Nehalem.to_string(), "nehalem");
        assert_eq!(Microarch::Armv8.to_string(), "armv8");
        assert_eq!(Microarch::Dunno.to_string(), "dunno");
    }

    #[test]
    fn serde_round_trip_preserves_unknown_integers() {
        let m = Microarch::Unknown {
            family: 0x06,
            model: 0xff,
        };
        let json = serde_json::to_string(&m).unwrap();
        let back: Microarch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let json = serde_json::to_string(&Microarch::Skylake).unwrap();
        assert_eq!(json, "\"skylake\"");
    }
}
