//! Snapshot import and export.
//!
//! A snapshot is the JSON document holding every group with its roster and
//! bills. It is the only input the CLI reads; the engine itself works on the
//! in-memory [`Group`] values it contains.

pub mod error;

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitbill_shared::types::BillId;
use tracing::info;

use crate::bill::{Bill, BillTotal, validate_bill};
use crate::group::Group;

pub use error::SnapshotError;

/// Every group known to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    /// Groups, in creation order.
    pub groups: Vec<Group>,
}

impl Snapshot {
    /// Wraps a list of groups.
    #[must_use]
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Parses and validates a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the JSON is malformed, names collide, or a
    /// bill fails [`validate_bill`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;

        info!(
            groups = snapshot.groups.len(),
            bills = snapshot.bill_count(),
            "snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Exports the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Parse` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks name uniqueness, every bill, and that each group's bills can
    /// be summed without overflowing.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut group_names = HashSet::new();

        for group in &self.groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(SnapshotError::DuplicateGroupName(group.name.clone()));
            }

            let mut circle_names = HashSet::new();
            for circle in &group.circles {
                if !circle_names.insert(circle.name.as_str()) {
                    return Err(SnapshotError::DuplicateCircleName {
                        group: group.name.clone(),
                        name: circle.name.clone(),
                    });
                }
            }

            let mut person_names = HashSet::new();
            for person in group.all_people() {
                if !person_names.insert(person.name.as_str()) {
                    return Err(SnapshotError::DuplicatePersonName {
                        group: group.name.clone(),
                        name: person.name.clone(),
                    });
                }
            }

            // Per-person debts never exceed the group total, so aggregation
            // cannot overflow once this sum fits.
            let mut group_total = Decimal::ZERO;
            for bill in &group.bills {
                validate_bill(bill, group).map_err(|source| SnapshotError::Bill {
                    group: group.name.clone(),
                    source,
                })?;
                group_total = group_total
                    .checked_add(BillTotal::total(bill))
                    .ok_or_else(|| SnapshotError::GroupTotalOverflow(group.name.clone()))?;
            }
        }

        Ok(())
    }

    /// Total number of bills across all groups.
    #[must_use]
    pub fn bill_count(&self) -> usize {
        self.groups.iter().map(|g| g.bills.len()).sum()
    }

    /// Finds a group by id or by exact name.
    #[must_use]
    pub fn find_group(&self, key: &str) -> Option<&Group> {
        self.groups
            .iter()
            .find(|g| g.id.as_str() == key)
            .or_else(|| self.groups.iter().find(|g| g.name == key))
    }

    /// Finds a bill and the group holding it.
    #[must_use]
    pub fn find_bill(&self, id: &BillId) -> Option<(&Group, &Bill)> {
        self.groups
            .iter()
            .find_map(|group| group.bill(id).map(|bill| (group, bill)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::{BillError, BillType};
    use crate::group::{GroupSummary, Person};
    use rust_decimal_macros::dec;
    use splitbill_shared::types::PersonId;

    fn sample() -> Snapshot {
        let mut group = Group::new("Beach");
        group.circles[0].people.push(Person::new("Ana"));
        group.circles[0].people.push(Person::new("Beto"));
        let ana = group.circles[0].people[0].id.clone();
        let bill = group.add_bill(BillType::Distributed);
        let fish = bill.add_product("Fish", dec!(2), dec!(12.5));
        bill.assign(&fish, ana).unwrap();

        Snapshot::new(vec![group, Group::new("Office")])
    }

    #[test]
    fn test_export_import() {
        let snapshot = sample();

        let json = snapshot.to_json_pretty().unwrap();
        let imported = Snapshot::from_json(&json).unwrap();

        assert_eq!(imported, snapshot);
        assert_eq!(imported.bill_count(), 1);
    }

    #[test]
    fn test_exported_document_is_an_array() {
        let json = sample().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert!(value[0]["groups"].is_array());
    }

    #[test]
    fn test_find_group_by_id_or_name() {
        let snapshot = sample();
        let beach = &snapshot.groups[0];

        assert_eq!(snapshot.find_group(&beach.id.to_string()), Some(beach));
        assert_eq!(snapshot.find_group("Beach"), Some(beach));
        assert!(snapshot.find_group("Mountains").is_none());
    }

    #[test]
    fn test_find_bill() {
        let snapshot = sample();
        let bill_id = snapshot.groups[0].bills[0].id.clone();

        let (group, bill) = snapshot.find_bill(&bill_id).unwrap();

        assert_eq!(group.name, "Beach");
        assert_eq!(bill.total(), dec!(25));
        assert!(snapshot.find_bill(&BillId::new()).is_none());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Snapshot::from_json("{ not json"),
            Err(SnapshotError::Parse(_))
        ));
        assert!(matches!(
            Snapshot::from_json(r#"[{"id": "x"}]"#),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_bill_type() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value[0]["bills"][0]["type"] = serde_json::json!("proportional");

        assert!(matches!(
            Snapshot::from_json(&value.to_string()),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_group_name() {
        let snapshot = Snapshot::new(vec![Group::new("Beach"), Group::new("Beach")]);
        let json = snapshot.to_json_pretty().unwrap();

        assert!(matches!(
            Snapshot::from_json(&json),
            Err(SnapshotError::DuplicateGroupName(name)) if name == "Beach"
        ));
    }

    #[test]
    fn test_rejects_duplicate_person_name_across_circles() {
        let mut snapshot = sample();
        let mut other = crate::group::Circle::new("Kids", "#f97316");
        other.people.push(Person::new("Ana"));
        snapshot.groups[0].circles.push(other);

        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::DuplicatePersonName { name, .. }) if name == "Ana"
        ));
    }

    #[test]
    fn test_rejects_invalid_bill() {
        let mut snapshot = sample();
        let stranger = PersonId::new();
        snapshot.groups[0].bills[0].exonerate(stranger.clone());

        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Bill { source: BillError::UnknownPerson(id), .. }) if id == stranger
        ));
    }

    #[test]
    fn test_rejects_duplicate_circle_name() {
        let mut snapshot = sample();
        snapshot.groups[0]
            .circles
            .push(crate::group::Circle::new("Default", "#f97316"));

        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::DuplicateCircleName { group, name })
                if group == "Beach" && name == "Default"
        ));
    }

    #[test]
    fn test_rejects_group_total_overflow() {
        let mut group = Group::new("Casino");
        group.circles[0].people.push(Person::new("Ana"));
        let half = Decimal::MAX / dec!(2) + Decimal::ONE;
        for _ in 0..2 {
            group.add_bill(BillType::Equal).add_product("Chips", dec!(1), half);
        }
        let snapshot = Snapshot::new(vec![group]);

        // Each bill is fine on its own.
        for bill in &snapshot.groups[0].bills {
            assert_eq!(validate_bill(bill, &snapshot.groups[0]), Ok(()));
        }
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::GroupTotalOverflow(name)) if name == "Casino"
        ));
    }

    #[test]
    fn test_imports_export_with_ulid_ids() {
        let json = r##"[
          {
            "id": "01JABCDEF0123456789ABCDEFG",
            "name": "Finca",
            "groups": [
              {
                "id": "01JABCDEF0123456789ABCDEFH",
                "name": "Default",
                "color": "#3b82f6",
                "people": [
                  { "id": "01JABCDEF0123456789ABCDEFJ", "name": "Ana", "active": true },
                  { "id": "01JABCDEF0123456789ABCDEFK", "name": "Beto", "active": true },
                  { "id": "01JABCDEF0123456789ABCDEFM", "name": "Caro", "active": false }
                ]
              }
            ],
            "bills": [
              {
                "id": "01JABCDEF0123456789ABCDEFN",
                "parcheId": "01JABCDEF0123456789ABCDEFG",
                "type": "distributed",
                "products": [
                  {
                    "id": "01JABCDEF0123456789ABCDEFP",
                    "name": "Pizza",
                    "quantity": 2,
                    "price": 10,
                    "assignedTo": ["01JABCDEF0123456789ABCDEFJ"]
                  },
                  {
                    "id": "01JABCDEF0123456789ABCDEFQ",
                    "name": "Soda",
                    "quantity": 1,
                    "price": 6,
                    "assignedTo": []
                  }
                ],
                "exoneratedPeople": [],
                "createdAt": "2025-11-02T18:30:00.000Z"
              }
            ]
          }
        ]"##;

        let snapshot = Snapshot::from_json(json).unwrap();

        let group = snapshot.find_group("01JABCDEF0123456789ABCDEFG").unwrap();
        assert_eq!(group.name, "Finca");
        let bill_id: BillId = "01JABCDEF0123456789ABCDEFN".parse().unwrap();
        assert!(snapshot.find_bill(&bill_id).is_some());

        let summary = GroupSummary::build(group);
        let debts: Vec<(&str, Decimal)> = summary
            .person_debts
            .iter()
            .map(|d| (d.person_name.as_str(), d.amount))
            .collect();
        assert_eq!(debts, vec![("Ana", dec!(23)), ("Beto", dec!(3))]);
        assert_eq!(summary.total_spent, dec!(26));
    }
}
