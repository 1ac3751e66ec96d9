use crate::shared::error::TrimError;
use crate::shared::Result;
use crate::trimming::domain::{Combination, SpecializedDependency};

/// Largest member count for which every subset is generated (2^20 descriptors)
pub const MAX_COMBINATION_MEMBERS: usize = 20;

/// CombinationEnumerator service for the power set of specialized dependencies
pub struct CombinationEnumerator;

impl CombinationEnumerator {
    /// Enumerates all 2^n subsets of `members`, the empty subset included.
    ///
    /// Members are sorted first, so the ordinal of each subset is stable for a
    /// given input set regardless of the order it was accumulated in. The
    /// ordinal is the subset's bit mask plus one; bit `i` selects the `i`th
    /// member in sorted order.
    ///
    /// # Errors
    /// Returns an error if there are more than [`MAX_COMBINATION_MEMBERS`] members
    pub fn enumerate(members: &[SpecializedDependency]) -> Result<Vec<Combination>> {
        let total = members.len();
        if total > MAX_COMBINATION_MEMBERS {
            return Err(TrimError::Validation {
                message: format!(
                    "{} specialized dependencies would produce 2^{} descriptor variants. \
                     All-combinations mode supports at most {} dependencies.",
                    total, total, MAX_COMBINATION_MEMBERS
                ),
            }
            .into());
        }

        let mut sorted = members.to_vec();
        sorted.sort();
        sorted.dedup();
        let total = sorted.len();

        let combinations = (0..1usize << total)
            .map(|mask| {
                let subset = sorted
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, member)| member.clone())
                    .collect();
                Combination::new(subset, mask + 1, total)
            })
            .collect();

        Ok(combinations)
    }

    /// The single combination holding every member, for single-variant mode.
    ///
    /// Its ordinal is always 1; the single variant is named without one.
    pub fn everything(members: &[SpecializedDependency]) -> Combination {
        let mut sorted = members.to_vec();
        sorted.sort();
        sorted.dedup();
        let total = sorted.len();
        Combination::new(sorted, 1, total)
    }
}
