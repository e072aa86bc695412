//! Person-to-amount debt mapping.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitbill_shared::types::PersonId;

use super::allocation::AllocationUtil;

/// Amount owed by each person, keyed by person id.
///
/// A mapping produced by a split contains every participating person, even
/// those owing exactly zero. Aggregated mappings may omit people who never
/// participated; [`DebtMapping::amount_owed`] treats an absent key as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtMapping(HashMap<PersonId, Decimal>);

impl DebtMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Creates a mapping holding every given person at zero.
    #[must_use]
    pub fn with_participants<I>(people: I) -> Self
    where
        I: IntoIterator<Item = PersonId>,
    {
        people.into_iter().map(|id| (id, Decimal::ZERO)).collect()
    }

    /// Returns the recorded amount for a person, if present.
    #[must_use]
    pub fn get(&self, person: &PersonId) -> Option<Decimal> {
        self.0.get(person).copied()
    }

    /// Returns the amount owed by a person, zero when absent.
    #[must_use]
    pub fn amount_owed(&self, person: &PersonId) -> Decimal {
        self.get(person).unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the person has an entry.
    #[must_use]
    pub fn contains(&self, person: &PersonId) -> bool {
        self.0.contains_key(person)
    }

    /// Overwrites the amount for a person.
    pub fn set(&mut self, person: PersonId, amount: Decimal) {
        self.0.insert(person, amount);
    }

    /// Adds to a person's amount, inserting them at zero first if absent.
    pub fn add(&mut self, person: PersonId, amount: Decimal) {
        *self.0.entry(person).or_insert(Decimal::ZERO) += amount;
    }

    /// Adds to a person's amount only if they already have an entry.
    ///
    /// Returns false (and changes nothing) for unknown people.
    pub fn add_existing(&mut self, person: &PersonId, amount: Decimal) -> bool {
        match self.0.get_mut(person) {
            Some(owed) => {
                *owed += amount;
                true
            }
            None => false,
        }
    }

    /// Folds another mapping into this one by addition.
    pub fn merge(&mut self, other: &Self) {
        for (person, amount) in &other.0 {
            self.add(person.clone(), *amount);
        }
    }

    /// Sum of all recorded amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Number of people with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no person has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &Decimal)> {
        self.0.iter()
    }

    /// Entries sorted by person id, for deterministic output.
    #[must_use]
    pub fn sorted(&self) -> Vec<(PersonId, Decimal)> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(id, amount)| (id.clone(), *amount))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Rounds every amount to `decimal_places` for display.
    ///
    /// Uses the Largest Remainder Method so the rounded amounts add up to the
    /// rounded total of this mapping. Ties go to the lower person id.
    #[must_use]
    pub fn rounded(&self, decimal_places: u32) -> Self {
        let entries = self.sorted();
        let amounts: Vec<Decimal> = entries.iter().map(|(_, amount)| *amount).collect();
        let rounded = AllocationUtil::round_preserving_total(&amounts, decimal_places);

        entries
            .into_iter()
            .map(|(id, _)| id)
            .zip(rounded)
            .collect()
    }
}

impl FromIterator<(PersonId, Decimal)> for DebtMapping {
    fn from_iter<T: IntoIterator<Item = (PersonId, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DebtMapping {
    type Item = (&'a PersonId, &'a Decimal);
    type IntoIter = std::collections::hash_map::Iter<'a, PersonId, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
