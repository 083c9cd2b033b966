//! Raw system-info parsing and feature-flag queries.
//!
//! [`CpuInfo`] is the single long-lived context object for CPU facts. It
//! owns the raw text (read once, immutable thereafter) and memoizes
//! everything derived from it for the life of the process.
//!
//! The text is `/proc/cpuinfo`-shaped: lines of `label : value`. Lines
//! that do not match a known label are ignored, and a missing label
//! degrades to a neutral default (0, or an empty flag set) rather than an
//! error.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{HwIdError, Result};
use crate::microarch::{classify, Microarch};

/// Broad architecture class of the host processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchKind {
    /// x86 / x86-64 (Intel-compatible, including AMD).
    Intel,
    /// 32- or 64-bit ARM.
    Arm,
    /// PowerPC.
    PowerPc,
    /// Anything else.
    Other,
}

impl ArchKind {
    /// Architecture class of the running host.
    pub fn host() -> Self {
        if cfg!(any(target_arch = "x86", target_arch = "x86_64")) {
            ArchKind::Intel
        } else if cfg!(any(target_arch = "arm", target_arch = "aarch64")) {
            ArchKind::Arm
        } else if cfg!(any(target_arch = "powerpc", target_arch = "powerpc64")) {
            ArchKind::PowerPc
        } else {
            ArchKind::Other
        }
    }
}

/// Instruction-set extensions with dedicated predicates.
///
/// A closed set: each variant maps to a fixed token spelling (or union of
/// spellings) in the raw flags line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Aes,
    Altivec,
    Avx,
    Avx2,
    /// Long mode (64-bit capable).
    Lm,
    Sse3,
    Sse4,
    Sse4_2,
    Ssse3,
}

/// Process-lifetime view of the host CPU.
#[derive(Debug)]
pub struct CpuInfo {
    arch: ArchKind,
    raw: String,
    flags: OnceLock<BTreeSet<String>>,
    microarch: OnceLock<Microarch>,
}

impl CpuInfo {
    /// Wrap already-materialized system-info text.
    pub fn new(arch: ArchKind, raw: impl Into<String>) -> Self {
        Self {
            arch,
            raw: raw.into(),
            flags: OnceLock::new(),
            microarch: OnceLock::new(),
        }
    }

    /// Read the system-info text from a file, typically `/proc/cpuinfo`.
    ///
    /// An unreadable source is the one fatal condition in this crate.
    pub fn from_path(arch: ArchKind, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HwIdError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::new(arch, raw))
    }

    /// The architecture class this context was constructed with.
    pub fn arch(&self) -> ArchKind {
        self.arch
    }

    /// Feature tokens from the first `flags`/`Features` line, lowercased.
    ///
    /// The label comparison is case-insensitive (x86 kernels write
    /// `flags`, ARM kernels write `Features`). No matching line means an
    /// empty set, never an error.
    pub fn flags(&self) -> &BTreeSet<String> {
        self.flags.get_or_init(|| parse_flags(&self.raw))
    }

    /// Exact membership query against the cached flag set.
    pub fn has(&self, token: &str) -> bool {
        self.flags().contains(token)
    }

    /// Whether the processor supports an instruction-set extension.
    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::Aes => self.has("aes"),
            Feature::Altivec => self.has("altivec"),
            Feature::Avx => self.has("avx"),
            Feature::Avx2 => self.has("avx2"),
            Feature::Lm => self.has("lm"),
            Feature::Ssse3 => self.has("ssse3"),
            // Older kernels spell SSE3 as "pni" (Prescott New Instructions).
            Feature::Sse3 => self.has("pni") || self.has("sse3"),
            // SSE4.2 is tracked separately and does not imply 4.1.
            Feature::Sse4 => self.has("sse4_1"),
            Feature::Sse4_2 => self.has("sse4_2"),
        }
    }

    /// Whether the processor is 64-bit capable (long mode).
    pub fn is_64_bit(&self) -> bool {
        self.supports(Feature::Lm)
    }

    /// `(cpu family, model)` parsed from their labeled lines.
    ///
    /// A missing or unparseable value defaults to 0. The `model` label
    /// must match exactly, so `model name` lines are never confused for
    /// it.
    pub fn family_model(&self) -> (u32, u32) {
        (
            labeled_u32(&self.raw, "cpu family"),
            labeled_u32(&self.raw, "model"),
        )
    }

    /// Classify the host microarchitecture.
    ///
    /// ARM- and PowerPC-class hosts short-circuit to their class symbol
    /// before any text parsing; other non-Intel hosts classify to
    /// [`Microarch::Dunno`]. Intel-compatible hosts go through the
    /// family/model table, falling back to [`Microarch::Unknown`] for
    /// silicon the table does not list. Deterministic: every call returns
    /// the same symbol.
    pub fn microarchitecture(&self) -> Microarch {
        *self.microarch.get_or_init(|| match self.arch {
            ArchKind::Arm => Microarch::Arm,
            ArchKind::PowerPc => Microarch::Ppc,
            ArchKind::Other => Microarch::Dunno,
            ArchKind::Intel => {
                let (family, model) = self.family_model();
                classify(family, model)
            }
        })
    }
}

fn parse_flags(raw: &str) -> BTreeSet<String> {
    for line in raw.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim();
        if label.eq_ignore_ascii_case("flags") || label.eq_ignore_ascii_case("features") {
            return value
                .split_whitespace()
                .map(|t| t.to_ascii_lowercase())
                .collect();
        }
    }
    BTreeSet::new()
}

fn labeled_u32(raw: &str, label: &str) -> u32 {
    raw.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == label)
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
