//! The four embedded media kinds.
//!
//! Each kind only has to expose its identifier to live in an
//! [`OrderedCollection`](pumukit_collection::OrderedCollection); the rest of
//! the fields are payload the ordering logic never looks at.

use pumukit_collection::Embedded;
use pumukit_types::EmbeddedId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which embedded list of a multimedia object an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedKind {
    Pic,
    Material,
    Link,
    Track,
}

impl EmbeddedKind {
    /// All kinds, in the order the admin UI shows them.
    pub const ALL: [EmbeddedKind; 4] = [Self::Pic, Self::Material, Self::Link, Self::Track];

    /// Lowercase name used on the command line and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pic => "pic",
            Self::Material => "material",
            Self::Link => "link",
            Self::Track => "track",
        }
    }
}

impl fmt::Display for EmbeddedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddedKind {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::ModelError::UnknownKind(s.to_string()))
    }
}

/// Items that carry free-form tags (e.g. `"master"`, `"profile:video_h264"`).
pub trait Tagged {
    fn tags(&self) -> &[String];

    /// Returns true if the item carries `tag`.
    fn contains_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Returns true if the item carries every tag in `tags`.
    fn contains_all_tags(&self, tags: &[&str]) -> bool {
        tags.iter().all(|tag| self.contains_tag(tag))
    }
}

fn push_tag(tags: &mut Vec<String>, tag: impl Into<String>) {
    let tag = tag.into();
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// A picture (thumbnail, poster frame) attached to a multimedia object.
///
/// The identifier is fixed at construction; only the payload is writable.
///
/// ```compile_fail
/// use pumukit_model::Pic;
/// use pumukit_types::EmbeddedId;
///
/// let mut pic = Pic::new(EmbeddedId::new(), "/a.jpg");
/// pic.id = EmbeddedId::new();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pic {
    id: EmbeddedId,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hide: bool,
}

impl Pic {
    pub fn new(id: EmbeddedId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            path: None,
            tags: Vec::new(),
            hide: false,
        }
    }

    /// Adds a tag unless already present.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        push_tag(&mut self.tags, tag);
        self
    }
}

/// A downloadable attachment (slides, documents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    id: EmbeddedId,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hide: bool,
}

impl Material {
    pub fn new(id: EmbeddedId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            path: None,
            mime_type: None,
            tags: Vec::new(),
            hide: false,
        }
    }
}

/// An external link related to the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    id: EmbeddedId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Link {
    pub fn new(id: EmbeddedId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            tags: Vec::new(),
        }
    }
}

/// An audio or video rendition of the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    id: EmbeddedId,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub only_audio: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hide: bool,
}

impl Track {
    pub fn new(id: EmbeddedId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            url: None,
            language: None,
            mime_type: None,
            duration: 0,
            only_audio: false,
            tags: Vec::new(),
            hide: false,
        }
    }

    /// Adds a tag unless already present.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        push_tag(&mut self.tags, tag);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Adds a tag unless already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        push_tag(&mut self.tags, tag);
    }

    /// Removes a tag. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}

macro_rules! embedded_with_tags {
    ($($kind:ty),+ $(,)?) => {
        $(
            impl $kind {
                /// Identifier assigned at construction.
                #[must_use]
                pub fn id(&self) -> &EmbeddedId {
                    &self.id
                }
            }

            impl Embedded for $kind {
                type Id = EmbeddedId;

                fn id(&self) -> &EmbeddedId {
                    &self.id
                }
            }

            impl Tagged for $kind {
                fn tags(&self) -> &[String] {
                    &self.tags
                }
            }
        )+
    };
}

embedded_with_tags!(Pic, Material, Link, Track);
