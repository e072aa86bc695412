//! Bill data types and in-memory editing.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitbill_shared::types::{BillId, GroupId, PersonId, ProductId};

use super::error::BillError;
use super::total::BillTotal;

/// How a bill is split among participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillType {
    /// Total divided evenly; product assignment is ignored.
    Equal,
    /// Assigned products charged to their assignees, the rest split evenly.
    Distributed,
}

impl BillType {
    /// Wire name of the bill type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Distributed => "distributed",
        }
    }
}

impl std::fmt::Display for BillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line item on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Number of units.
    pub quantity: Decimal,
    /// Price per unit.
    pub price: Decimal,
    /// People sharing this product.
    #[serde(default)]
    pub assigned_to: BTreeSet<PersonId>,
}

impl Product {
    /// Creates an unassigned product.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: Decimal, price: Decimal) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            quantity,
            price,
            assigned_to: BTreeSet::new(),
        }
    }

    /// `quantity * price`.
    ///
    /// # Panics
    ///
    /// Panics on decimal overflow; validated bills never overflow.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.quantity * self.price
    }

    /// `quantity * price`, or `None` on overflow.
    #[must_use]
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.price)
    }

    /// Returns true if at least one person is assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.assigned_to.is_empty()
    }
}

/// A single shared expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Bill ID.
    pub id: BillId,
    /// Owning group.
    #[serde(alias = "parcheId", alias = "squadId")]
    pub group_id: GroupId,
    /// Split type.
    #[serde(rename = "type")]
    pub bill_type: BillType,
    /// Line items, in entry order.
    #[serde(default)]
    pub products: Vec<Product>,
    /// People excused from paying this bill.
    #[serde(default)]
    pub exonerated_people: BTreeSet<PersonId>,
    /// Creation timestamp. Informational only.
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Creates an empty bill for a group.
    #[must_use]
    pub fn new(group_id: GroupId, bill_type: BillType) -> Self {
        Self {
            id: BillId::new(),
            group_id,
            bill_type,
            products: Vec::new(),
            exonerated_people: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Sum of all product subtotals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        BillTotal::total(self)
    }

    /// Changes the split type.
    pub fn set_type(&mut self, bill_type: BillType) {
        self.bill_type = bill_type;
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    fn product_mut(&mut self, id: &ProductId) -> Result<&mut Product, BillError> {
        self.products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| BillError::ProductNotFound(id.clone()))
    }

    /// Appends an unassigned product and returns its id.
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        quantity: Decimal,
        price: Decimal,
    ) -> ProductId {
        let product = Product::new(name, quantity, price);
        let id = product.id.clone();
        self.products.push(product);
        id
    }

    /// Removes a product.
    ///
    /// # Errors
    ///
    /// Returns `BillError::ProductNotFound` if the product is not on this bill.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<Product, BillError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| BillError::ProductNotFound(id.clone()))?;
        Ok(self.products.remove(index))
    }

    /// Assigns a product to a person. Assigning twice has no effect.
    ///
    /// # Errors
    ///
    /// Returns `BillError::ProductNotFound` if the product is not on this bill.
    pub fn assign(&mut self, product: &ProductId, person: PersonId) -> Result<(), BillError> {
        self.product_mut(product)?.assigned_to.insert(person);
        Ok(())
    }

    /// Removes a person from a product's assignees.
    ///
    /// # Errors
    ///
    /// Returns `BillError::ProductNotFound` if the product is not on this bill.
    pub fn unassign(&mut self, product: &ProductId, person: &PersonId) -> Result<(), BillError> {
        self.product_mut(product)?.assigned_to.remove(person);
        Ok(())
    }

    /// Flips a person's assignment to a product.
    ///
    /// Returns true if the person is assigned afterwards.
    ///
    /// # Errors
    ///
    /// Returns `BillError::ProductNotFound` if the product is not on this bill.
    pub fn toggle_assignment(
        &mut self,
        product: &ProductId,
        person: PersonId,
    ) -> Result<bool, BillError> {
        let assigned_to = &mut self.product_mut(product)?.assigned_to;
        if assigned_to.remove(&person) {
            Ok(false)
        } else {
            assigned_to.insert(person);
            Ok(true)
        }
    }

    /// Returns true if the person is excused from this bill.
    #[must_use]
    pub fn is_exonerated(&self, person: &PersonId) -> bool {
        self.exonerated_people.contains(person)
    }

    /// Excuses a person from this bill. Returns false if already excused.
    pub fn exonerate(&mut self, person: PersonId) -> bool {
        self.exonerated_people.insert(person)
    }

    /// Makes a person pay this bill again. Returns false if they were not excused.
    pub fn unexonerate(&mut self, person: &PersonId) -> bool {
        self.exonerated_people.remove(person)
    }

    /// Flips a person's exoneration. Returns true if excused afterwards.
    pub fn toggle_exoneration(&mut self, person: PersonId) -> bool {
        if self.exonerated_people.remove(&person) {
            false
        } else {
            self.exonerated_people.insert(person);
            true
        }
    }
}
