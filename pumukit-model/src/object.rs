use crate::ModelResult;
use crate::broadcast::{BroadcastType, EmbeddedBroadcast};
use crate::config::SchemaConfig;
use crate::media::{EmbeddedKind, Link, Material, Pic, Tagged, Track};
use crate::person::{EmbeddedPerson, EmbeddedRole, Role};
use crate::segment::EmbeddedSegment;
use crate::status::Status;
use pumukit_collection::OrderedCollection;
use pumukit_types::{EmbeddedId, MultimediaObjectId, PersonId, SeriesId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Pics = OrderedCollection<Pic>;
pub type Materials = OrderedCollection<Material>;
pub type Links = OrderedCollection<Link>;
pub type Tracks = OrderedCollection<Track>;
pub type Roles = OrderedCollection<EmbeddedRole>;

/// A multimedia object: one recording with its pictures, attachments,
/// links, renditions and credited people.
///
/// The embedded lists are private so they can only change through the
/// collection operations. `version` is owned by the persistence gateway and
/// is not part of the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimediaObject {
    pub id: MultimediaObjectId,
    #[serde(skip)]
    pub version: u64,
    pub title: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<SeriesId>,
    #[serde(default)]
    properties: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pics: Pics,
    #[serde(default)]
    materials: Materials,
    #[serde(default)]
    links: Links,
    #[serde(default)]
    tracks: Tracks,
    #[serde(default)]
    people: Roles,
    #[serde(default)]
    embedded_broadcast: EmbeddedBroadcast,
    #[serde(default)]
    embedded_segments: Vec<EmbeddedSegment>,
}

macro_rules! embedded_accessors {
    (
        $field:ident: $ty:ty,
        add = $add:ident,
        by_id = $by_id:ident,
        by_id_mut = $by_id_mut:ident,
        remove = $remove:ident,
        up = $up:ident,
        down = $down:ident $(,)?
    ) => {
        #[doc = concat!("The ", stringify!($field), " in display order.")]
        #[must_use]
        pub fn $field(&self) -> &OrderedCollection<$ty> {
            &self.$field
        }

        #[doc = concat!("Appends a ", stringify!($ty), "; fails if its id is already used.")]
        pub fn $add(&mut self, item: $ty) -> ModelResult<()> {
            self.$field.add(item)?;
            Ok(())
        }

        #[must_use]
        pub fn $by_id<'a>(&self, id: impl Into<Option<&'a EmbeddedId>>) -> Option<&$ty> {
            self.$field.find_by_id(id)
        }

        #[doc = concat!("Mutable access to a ", stringify!($ty), "'s payload. Its id stays read-only.")]
        pub fn $by_id_mut<'a>(&mut self, id: impl Into<Option<&'a EmbeddedId>>) -> Option<&mut $ty> {
            self.$field.find_by_id_mut(id)
        }

        pub fn $remove<'a>(&mut self, id: impl Into<Option<&'a EmbeddedId>>) -> Option<$ty> {
            self.$field.remove_by_id(id)
        }

        pub fn $up<'a>(&mut self, id: impl Into<Option<&'a EmbeddedId>>) -> bool {
            self.$field.move_up(id)
        }

        pub fn $down<'a>(&mut self, id: impl Into<Option<&'a EmbeddedId>>) -> bool {
            self.$field.move_down(id)
        }
    };
}

impl MultimediaObject {
    /// Creates an empty, never-saved object.
    pub fn new(id: MultimediaObjectId, title: impl Into<String>) -> Self {
        Self {
            id,
            version: 0,
            title: title.into(),
            status: Status::New,
            series_id: None,
            properties: BTreeMap::new(),
            pics: Pics::new(),
            materials: Materials::new(),
            links: Links::new(),
            tracks: Tracks::new(),
            people: Roles::new(),
            embedded_broadcast: EmbeddedBroadcast::public(),
            embedded_segments: Vec::new(),
        }
    }

    embedded_accessors!(
        pics: Pic,
        add = add_pic,
        by_id = pic_by_id,
        by_id_mut = pic_by_id_mut,
        remove = remove_pic_by_id,
        up = up_pic_by_id,
        down = down_pic_by_id,
    );

    embedded_accessors!(
        materials: Material,
        add = add_material,
        by_id = material_by_id,
        by_id_mut = material_by_id_mut,
        remove = remove_material_by_id,
        up = up_material_by_id,
        down = down_material_by_id,
    );

    embedded_accessors!(
        links: Link,
        add = add_link,
        by_id = link_by_id,
        by_id_mut = link_by_id_mut,
        remove = remove_link_by_id,
        up = up_link_by_id,
        down = down_link_by_id,
    );

    embedded_accessors!(
        tracks: Track,
        add = add_track,
        by_id = track_by_id,
        by_id_mut = track_by_id_mut,
        remove = remove_track_by_id,
        up = up_track_by_id,
        down = down_track_by_id,
    );

    // ── Kind-dispatched operations ───────────────────────────────

    /// Removes an item from the list of the given kind. Returns true if
    /// something was removed.
    pub fn remove_embedded(&mut self, kind: EmbeddedKind, id: &EmbeddedId) -> bool {
        match kind {
            EmbeddedKind::Pic => self.pics.remove_by_id(id).is_some(),
            EmbeddedKind::Material => self.materials.remove_by_id(id).is_some(),
            EmbeddedKind::Link => self.links.remove_by_id(id).is_some(),
            EmbeddedKind::Track => self.tracks.remove_by_id(id).is_some(),
        }
    }

    /// Moves an item one place up in the list of the given kind.
    pub fn move_embedded_up(&mut self, kind: EmbeddedKind, id: &EmbeddedId) -> bool {
        match kind {
            EmbeddedKind::Pic => self.pics.move_up(id),
            EmbeddedKind::Material => self.materials.move_up(id),
            EmbeddedKind::Link => self.links.move_up(id),
            EmbeddedKind::Track => self.tracks.move_up(id),
        }
    }

    /// Moves an item one place down in the list of the given kind.
    pub fn move_embedded_down(&mut self, kind: EmbeddedKind, id: &EmbeddedId) -> bool {
        match kind {
            EmbeddedKind::Pic => self.pics.move_down(id),
            EmbeddedKind::Material => self.materials.move_down(id),
            EmbeddedKind::Link => self.links.move_down(id),
            EmbeddedKind::Track => self.tracks.move_down(id),
        }
    }

    /// Identifiers of the given kind, in display order.
    #[must_use]
    pub fn embedded_ids(&self, kind: EmbeddedKind) -> Vec<EmbeddedId> {
        match kind {
            EmbeddedKind::Pic => self.pics.ids().copied().collect(),
            EmbeddedKind::Material => self.materials.ids().copied().collect(),
            EmbeddedKind::Link => self.links.ids().copied().collect(),
            EmbeddedKind::Track => self.tracks.ids().copied().collect(),
        }
    }

    // ── Tag queries ──────────────────────────────────────────────

    /// First track carrying `tag`.
    #[must_use]
    pub fn track_with_tag(&self, tag: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.contains_tag(tag))
    }

    /// All tracks carrying `tag`, in display order.
    #[must_use]
    pub fn tracks_with_tag(&self, tag: &str) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.contains_tag(tag)).collect()
    }

    /// All tracks carrying every tag in `tags`.
    #[must_use]
    pub fn tracks_with_all_tags(&self, tags: &[&str]) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.contains_all_tags(tags)).collect()
    }

    #[must_use]
    pub fn pics_with_tag(&self, tag: &str) -> Vec<&Pic> {
        self.pics.iter().filter(|p| p.contains_tag(tag)).collect()
    }

    /// True when the object has tracks and every one of them is audio only.
    #[must_use]
    pub fn is_only_audio(&self) -> bool {
        !self.tracks.is_empty() && self.tracks.iter().all(|t| t.only_audio)
    }

    /// URL of the first visible picture, falling back to the configured
    /// default for audio or video objects.
    #[must_use]
    pub fn display_pic_url<'a>(&'a self, config: &'a SchemaConfig) -> &'a str {
        self.pic_url_or_default(config, false)
    }

    /// Like [`display_pic_url`](Self::display_pic_url), but audio-only
    /// objects without a picture get the HD audio default.
    #[must_use]
    pub fn display_pic_url_hd<'a>(&'a self, config: &'a SchemaConfig) -> &'a str {
        self.pic_url_or_default(config, true)
    }

    fn pic_url_or_default<'a>(&'a self, config: &'a SchemaConfig, hd: bool) -> &'a str {
        if let Some(pic) = self.pics.iter().find(|p| !p.hide) {
            return &pic.url;
        }
        match (self.is_only_audio(), hd) {
            (true, true) => &config.default_audio_hd_pic,
            (true, false) => &config.default_audio_sd_pic,
            (false, _) => &config.default_video_pic,
        }
    }

    // ── People ───────────────────────────────────────────────────

    /// Roles in the order they were first used.
    #[must_use]
    pub fn people(&self) -> &Roles {
        &self.people
    }

    /// People holding role `cod`, in display order. Empty for unused roles.
    #[must_use]
    pub fn people_by_role(&self, cod: &str) -> &[EmbeddedPerson] {
        self.role(cod).map(|role| role.people().list()).unwrap_or_default()
    }

    /// Credits `person` with `role`. Returns false, changing nothing, when
    /// the person already holds that role.
    pub fn add_person_with_role(&mut self, person: EmbeddedPerson, role: &Role) -> ModelResult<bool> {
        if !self.people.contains_id(&role.cod) {
            self.people.add(EmbeddedRole::new(role))?;
        }
        let Some(embedded) = self.people.find_by_id_mut(&role.cod) else {
            return Ok(false);
        };
        if embedded.people().contains_id(person.id()) {
            return Ok(false);
        }
        embedded.people_mut().add(person)?;
        Ok(true)
    }

    /// Credits `person` with the auto-publisher role from `config`.
    pub fn add_auto_publisher(&mut self, person: EmbeddedPerson, config: &SchemaConfig) -> ModelResult<bool> {
        let cod = &config.auto_publisher_role_code;
        self.add_person_with_role(person, &Role::new(cod.as_str(), cod.as_str()).hidden())
    }

    #[must_use]
    pub fn contains_person(&self, person_id: &PersonId) -> bool {
        self.people.iter().any(|role| role.people().contains_id(person_id))
    }

    #[must_use]
    pub fn contains_person_with_role(&self, person_id: &PersonId, cod: &str) -> bool {
        self.role(cod).is_some_and(|role| role.people().contains_id(person_id))
    }

    /// Removes `person_id` from role `cod`. A role left without people is
    /// dropped.
    pub fn remove_person_with_role(&mut self, person_id: &PersonId, cod: &str) -> bool {
        let cod = cod.to_string();
        let Some(role) = self.people.find_by_id_mut(&cod) else {
            return false;
        };
        let removed = role.people_mut().remove_by_id(person_id).is_some();
        if role.people().is_empty() {
            self.people.remove_by_id(&cod);
        }
        removed
    }

    pub fn up_person_with_role(&mut self, person_id: &PersonId, cod: &str) -> bool {
        self.people
            .find_by_id_mut(&cod.to_string())
            .is_some_and(|role| role.people_mut().move_up(person_id))
    }

    pub fn down_person_with_role(&mut self, person_id: &PersonId, cod: &str) -> bool {
        self.people
            .find_by_id_mut(&cod.to_string())
            .is_some_and(|role| role.people_mut().move_down(person_id))
    }

    fn role(&self, cod: &str) -> Option<&EmbeddedRole> {
        self.people.iter().find(|role| role.cod() == cod)
    }

    // ── Properties ───────────────────────────────────────────────

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// String-valued property, e.g. `opencast` or `opencasturl`.
    #[must_use]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn remove_property(&mut self, key: &str) -> Option<serde_json::Value> {
        self.properties.remove(key)
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.properties
    }

    // ── Broadcast ────────────────────────────────────────────────

    #[must_use]
    pub fn embedded_broadcast(&self) -> &EmbeddedBroadcast {
        &self.embedded_broadcast
    }

    pub fn set_embedded_broadcast(&mut self, broadcast: EmbeddedBroadcast) {
        self.embedded_broadcast = broadcast;
    }

    /// Replaces the broadcast with a fresh one of the given type. The caller
    /// still has to save the object.
    pub fn set_broadcast_by_type(&mut self, broadcast_type: BroadcastType) {
        self.embedded_broadcast = EmbeddedBroadcast::for_type(broadcast_type);
    }

    // ── Segments ─────────────────────────────────────────────────

    #[must_use]
    pub fn embedded_segments(&self) -> &[EmbeddedSegment] {
        &self.embedded_segments
    }

    /// Replaces all segments at once.
    pub fn set_embedded_segments(&mut self, segments: Vec<EmbeddedSegment>) {
        self.embedded_segments = segments;
    }
}
