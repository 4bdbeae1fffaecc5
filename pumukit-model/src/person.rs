//! People credited in a multimedia object, grouped by role.
//!
//! Roles keep the order in which they were first used, and the people
//! inside each role are an ordered collection of their own, so both levels
//! reorder through the same [`OrderedCollection`] operations.

use pumukit_collection::{Embedded, OrderedCollection};
use pumukit_types::PersonId;
use serde::{Deserialize, Serialize};

/// A role definition (e.g. `owner`, `actor`, `presenter`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub cod: String,
    pub name: String,
    #[serde(default = "default_display")]
    pub display: bool,
}

fn default_display() -> bool {
    true
}

impl Role {
    pub fn new(cod: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cod: cod.into(),
            name: name.into(),
            display: true,
        }
    }

    /// Hides the role from public listings.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.display = false;
        self
    }
}

/// Copy of a person document stored inside a multimedia object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedPerson {
    id: PersonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmbeddedPerson {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &PersonId {
        &self.id
    }
}

impl Embedded for EmbeddedPerson {
    type Id = PersonId;

    fn id(&self) -> &PersonId {
        &self.id
    }
}

/// A role as used in one object, with the people holding it in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRole {
    cod: String,
    pub name: String,
    #[serde(default = "default_display")]
    pub display: bool,
    #[serde(default)]
    people: OrderedCollection<EmbeddedPerson>,
}

impl EmbeddedRole {
    /// An empty role built from its definition.
    pub fn new(role: &Role) -> Self {
        Self {
            cod: role.cod.clone(),
            name: role.name.clone(),
            display: role.display,
            people: OrderedCollection::new(),
        }
    }

    #[must_use]
    pub fn cod(&self) -> &str {
        &self.cod
    }

    #[must_use]
    pub fn people(&self) -> &OrderedCollection<EmbeddedPerson> {
        &self.people
    }

    pub(crate) fn people_mut(&mut self) -> &mut OrderedCollection<EmbeddedPerson> {
        &mut self.people
    }
}

impl Embedded for EmbeddedRole {
    type Id = String;

    fn id(&self) -> &String {
        &self.cod
    }
}
