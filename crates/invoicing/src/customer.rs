//! Customer records as listed by `GET /customers`.
//!
//! Invoice rows only carry a `customer_id`; names for display and search are
//! resolved through a [`CustomerDirectory`] built from the customer list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use invoicekit_core::CustomerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Lookup of customer names by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDirectory {
    names: HashMap<CustomerId, String>,
}

impl CustomerDirectory {
    pub fn new(customers: &[Customer]) -> Self {
        Self {
            names: customers
                .iter()
                .map(|c| (c.id, c.name.clone()))
                .collect(),
        }
    }

    pub fn name(&self, id: CustomerId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
