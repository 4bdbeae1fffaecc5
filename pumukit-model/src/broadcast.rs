use serde::{Deserialize, Serialize};
use std::fmt;

/// Access policy of a multimedia object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastType {
    #[default]
    Public,
    Password,
    Login,
    Groups,
}

impl BroadcastType {
    /// Type code as stored in documents.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Password => "password",
            Self::Login => "login",
            Self::Groups => "groups",
        }
    }

    /// Human-readable name shown in the admin UI.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Password => "Password protected",
            Self::Login => "Only logged in Users",
            Self::Groups => "Only Users in Groups",
        }
    }

    /// Reads a type code. Anything unrecognised is treated as public.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "password" => Self::Password,
            "login" => Self::Login,
            "groups" => Self::Groups,
            _ => Self::Public,
        }
    }

    /// Every type with its display name, in presentation order.
    #[must_use]
    pub fn all() -> [(BroadcastType, &'static str); 4] {
        [Self::Public, Self::Password, Self::Login, Self::Groups].map(|t| (t, t.display_name()))
    }
}

impl fmt::Display for BroadcastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Broadcast settings embedded in a multimedia object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedBroadcast {
    #[serde(rename = "type")]
    pub broadcast_type: BroadcastType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

impl EmbeddedBroadcast {
    /// A broadcast of the given type carrying that type's display name.
    #[must_use]
    pub fn for_type(broadcast_type: BroadcastType) -> Self {
        Self {
            broadcast_type,
            name: broadcast_type.display_name().to_string(),
            password: None,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn public() -> Self {
        Self::for_type(BroadcastType::Public)
    }

    /// Fresh copy for another object: type, name, password (if set) and groups.
    #[must_use]
    pub fn clone_resource(&self) -> Self {
        let mut copy = Self::for_type(self.broadcast_type);
        copy.name.clone_from(&self.name);
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            copy.password = Some(password.to_string());
        }
        for group in &self.groups {
            copy.add_group(group.clone());
        }
        copy
    }

    /// Adds a group unless already present.
    pub fn add_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
    }

    /// Removes a group. Returns true if it was present.
    pub fn remove_group(&mut self, group: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g != group);
        self.groups.len() != before
    }

    #[must_use]
    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

impl Default for EmbeddedBroadcast {
    fn default() -> Self {
        Self::public()
    }
}
