//! Microarchitecture → compiler optimization-flag mapping.

use std::collections::BTreeMap;

use crate::microarch::Microarch;

/// Immutable table mapping microarchitecture symbols to `-march` flags.
///
/// Built once at startup. The `native` entry is fixed at construction time
/// from the caller-supplied override; the table never re-reads the
/// environment, so later environment changes cannot affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationFlags {
    table: BTreeMap<Microarch, String>,
}

impl OptimizationFlags {
    /// Build the flag table.
    ///
    /// `native_override` replaces the literal `native` target in the
    /// [`Microarch::Native`] entry. It is passed through verbatim; callers
    /// wanting validation must do it before construction.
    pub fn new(native_override: Option<&str>) -> Self {
        let native = native_override.unwrap_or("native");
        let mut table = BTreeMap::new();
        table.insert(Microarch::Native, format!("-march={native}"));
        table.insert(Microarch::Nehalem, "-march=nehalem".to_string());
        table.insert(Microarch::Core2, "-march=core2".to_string());
        table.insert(Microarch::Core, "-march=prescott".to_string());
        table.insert(Microarch::Armv7, "-march=armv7".to_string());
        table.insert(Microarch::Armv8, "-march=armv8-a".to_string());
        Self { table }
    }

    /// Flag string for a microarchitecture, if the table has an entry.
    ///
    /// Symbols outside the table are the caller's concern; nothing is
    /// synthesized for them.
    pub fn get(&self, microarch: Microarch) -> Option<&str> {
        self.table.get(&microarch).map(String::as_str)
    }

    /// All `(microarchitecture, flag)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (Microarch, &str)> + '_ {
        self.table.iter().map(|(m, flag)| (*m, flag.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_defaults_to_literal_native() {
        let flags = OptimizationFlags::new(None);
        assert_eq!(flags.get(Microarch::Native), Some("-march=native"));
    }

    #[test]
    fn native_override_is_substituted() {
        let flags = OptimizationFlags::new(Some("skylake"));
        assert_eq!(flags.get(Microarch::Native), Some("-march=skylake"));
    }

    #[test]
    fn native_override_passes_through_verbatim() {
        // Overrides are not validated against known microarchitectures.
        let flags = OptimizationFlags::new(Some("not-a-real-march"));
        assert_eq!(flags.get(Microarch::Native), Some("-march=not-a-real-march"));
    }

    #[test]
    fn fixed_entries() {
        let flags = OptimizationFlags::new(None);
        assert_eq!(flags.get(Microarch::Nehalem), Some("-march=nehalem"));
        assert_eq!(flags.get(Microarch::Core2), Some("-march=core2"));
        assert_eq!(flags.get(Microarch::Core), Some("-march=prescott"));
        assert_eq!(flags.get(Microarch::Armv7), Some("-march=armv7"));
        assert_eq!(flags.get(Microarch::Armv8), Some("-march=armv8-a"));
    }

    #[test]
    fn absent_symbols_have_no_entry() {
        let flags = OptimizationFlags::new(None);
        assert_eq!(flags.get(Microarch::Skylake), None);
        assert_eq!(
            flags.get(Microarch::Unknown { family: 6, model: 255 }),
            None
        );
    }

    #[test]
    fn table_is_frozen_at_construction() {
        let with_override = OptimizationFlags::new(Some("znver3"));
        let without = OptimizationFlags::new(None);
        assert_ne!(with_override, without);
        // Each table keeps the value it was built with.
        assert_eq!(with_override.get(Microarch::Native), Some("-march=znver3"));
        assert_eq!(without.get(Microarch::Native), Some("-march=native"));
    }

    #[test]
    fn iter_yields_all_entries() {
        let flags = OptimizationFlags::new(None);
        assert_eq!(flags.iter().count(), 6);
        assert!(flags.iter().any(|(m, _)| m == Microarch::Native));
    }
}
