//! Group roster data types.

use serde::{Deserialize, Serialize};
use splitbill_shared::types::{BillId, CircleId, GroupId, PersonId};

use crate::bill::{Bill, BillType};

/// Color given to the circle every new group starts with.
pub const DEFAULT_CIRCLE_COLOR: &str = "#3b82f6";

/// A person who can owe money on the group's bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Person ID.
    pub id: PersonId,
    /// Display name, unique within the group.
    pub name: String,
    /// Inactive people never take part in splits.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Person {
    /// Creates a new active person.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            active: true,
        }
    }
}

/// A named sub-grouping of people inside a group.
///
/// Circles only organise the roster; they have no effect on splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    /// Circle ID.
    pub id: CircleId,
    /// Circle name, unique within the group.
    pub name: String,
    /// Display color (hex).
    #[serde(default = "default_color")]
    pub color: String,
    /// Members, in display order.
    #[serde(default)]
    pub people: Vec<Person>,
}

fn default_color() -> String {
    DEFAULT_CIRCLE_COLOR.to_string()
}

impl Circle {
    /// Creates an empty circle.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CircleId::new(),
            name: name.into(),
            color: color.into(),
            people: Vec::new(),
        }
    }
}

/// A group of people sharing bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Group name, unique across the snapshot.
    pub name: String,
    /// Circles holding the roster.
    #[serde(rename = "groups", alias = "circles", default)]
    pub circles: Vec<Circle>,
    /// Bills, in creation order.
    #[serde(default)]
    pub bills: Vec<Bill>,
}

impl Group {
    /// Creates a group with a single empty "Default" circle and no bills.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            circles: vec![Circle::new("Default", DEFAULT_CIRCLE_COLOR)],
            bills: Vec::new(),
        }
    }

    /// Every person in the group, flattened in circle order.
    pub fn all_people(&self) -> impl Iterator<Item = &Person> {
        self.circles.iter().flat_map(|circle| circle.people.iter())
    }

    /// The active people of the group, in circle order.
    ///
    /// This is the roster snapshot handed to the splitter.
    #[must_use]
    pub fn active_people(&self) -> Vec<Person> {
        self.all_people()
            .filter(|person| person.active)
            .cloned()
            .collect()
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.all_people().find(|person| person.id == *id)
    }

    /// Looks up a bill by id.
    #[must_use]
    pub fn bill(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == *id)
    }

    /// Looks up a bill by id for editing.
    pub fn bill_mut(&mut self, id: &BillId) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|bill| bill.id == *id)
    }

    /// Starts a new empty bill owned by this group and returns it.
    pub fn add_bill(&mut self, bill_type: BillType) -> &mut Bill {
        let index = self.bills.len();
        self.bills.push(Bill::new(self.id.clone(), bill_type));
        &mut self.bills[index]
    }
}
