//! Command implementations, kept free of argument parsing and printing so
//! they can run against any gateway.

use crate::cli::{NewItem, NewPerson};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use pumukit_calendar::{CalendarView, MonthNavigation};
use pumukit_model::{
    BroadcastType, EmbeddedBroadcast, EmbeddedKind, EmbeddedPerson, Link, Material, ModelResult,
    MultimediaObject, Pic, Role, SchemaConfig, Status, Tagged, Track, segments_from_media_package,
};
use pumukit_storage::{MultimediaObjectGateway, edit_object};
use pumukit_types::{EmbeddedId, IdGenerator, MultimediaObjectId, PersonId, SeriesId};
use pumukit_workflow::{JobOutcome, JobQueue, WorkflowService};
use serde_json::Value;
use std::fmt::Write as _;
use tracing::{info, warn};

/// Parses a multimedia object id given on the command line.
pub fn parse_object_id(raw: &str) -> Result<MultimediaObjectId> {
    MultimediaObjectId::parse(raw).with_context(|| format!("Please, use a valid ID (got {raw:?})"))
}

pub fn parse_embedded_id(raw: &str) -> Result<EmbeddedId> {
    EmbeddedId::parse(raw).with_context(|| format!("Invalid item id {raw:?}"))
}

pub fn parse_series_id(raw: &str) -> Result<SeriesId> {
    SeriesId::parse(raw).with_context(|| format!("Invalid series id {raw:?}"))
}

pub fn parse_person_id(raw: &str) -> Result<PersonId> {
    PersonId::parse(raw).with_context(|| format!("Invalid person id {raw:?}"))
}

// ── Calendar ─────────────────────────────────────────────────────

/// Resolves the month to show: today's month, overridden by `month` and
/// `year`, then moved by `nav`.
pub fn calendar_view(
    today: NaiveDate,
    month: Option<u32>,
    year: Option<i32>,
    nav: Option<MonthNavigation>,
) -> Result<CalendarView> {
    let current = CalendarView::current(today);
    let mut view = CalendarView::new(month.unwrap_or(current.month), year.unwrap_or(current.year))?;
    if let Some(nav) = nav {
        view.navigate(nav, today)?;
    }
    Ok(view)
}

/// Renders the month as a Monday-first text grid.
pub fn render_calendar(view: &CalendarView) -> Result<String> {
    let weeks = view.grid()?;
    let mut out = String::new();
    writeln!(out, "{view}")?;
    writeln!(out, " Mo Tu We Th Fr Sa Su")?;
    for week in weeks {
        for cell in week {
            match cell {
                Some(day) => write!(out, " {day:>2}")?,
                None => out.push_str("   "),
            }
        }
        out.push('\n');
    }
    Ok(out)
}

// ── Objects ──────────────────────────────────────────────────────

pub fn create_object(
    gateway: &dyn MultimediaObjectGateway,
    title: &str,
    series: Option<SeriesId>,
) -> Result<MultimediaObjectId> {
    let mut object = MultimediaObject::new(MultimediaObjectId::new(), title);
    object.series_id = series;
    gateway.save(&mut object)?;
    info!(object_id = %object.id, "Created multimedia object");
    Ok(object.id)
}

pub fn set_status(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    object_id: &MultimediaObjectId,
    status: Status,
) -> Result<()> {
    edit_object(gateway, object_id, max_attempts, |object| {
        object.status = status;
        Ok(())
    })?;
    info!(object_id = %object_id, %status, "Changed status");
    Ok(())
}

/// Object ids, all of them or those of one series. Status filters only
/// apply within a series.
pub fn list_objects(
    gateway: &dyn MultimediaObjectGateway,
    series: Option<&SeriesId>,
    statuses: &[Status],
    without_prototype: bool,
) -> Result<Vec<MultimediaObjectId>> {
    let Some(series) = series else {
        if !statuses.is_empty() || without_prototype {
            bail!("--status and --without-prototype need --series");
        }
        return Ok(gateway.list_ids()?);
    };
    let ids = match (statuses.is_empty(), without_prototype) {
        (true, false) => gateway.list_by_series(series)?,
        (true, true) => gateway.list_without_prototype(series)?,
        (false, _) => {
            let statuses: Vec<Status> = statuses
                .iter()
                .copied()
                .filter(|s| !(without_prototype && *s == Status::Prototype))
                .collect();
            gateway.list_with_status(series, &statuses)?
        }
    };
    Ok(ids)
}

/// One-screen summary of an object.
pub fn describe_object(object: &MultimediaObject, schema: &SchemaConfig) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{} (version {})", object.id, object.version)?;
    writeln!(out, "  title:     {}", object.title)?;
    writeln!(out, "  status:    {}", object.status)?;
    if let Some(series) = object.series_id {
        writeln!(out, "  series:    {series}")?;
    }
    writeln!(out, "  pic:       {}", object.display_pic_url(schema))?;
    writeln!(out, "  broadcast: {}", object.embedded_broadcast().name)?;
    for kind in EmbeddedKind::ALL {
        writeln!(out, "  {:<10} {}", format!("{kind}s:"), object.embedded_ids(kind).len())?;
    }
    let people: usize = object.people().iter().map(|role| role.people().len()).sum();
    writeln!(out, "  people:    {people}")?;
    writeln!(out, "  segments:  {}", object.embedded_segments().len())?;
    Ok(out)
}

// ── Embedded collections ─────────────────────────────────────────

fn required<'a>(value: &'a Option<String>, flag: &str, kind: EmbeddedKind) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => bail!("--{flag} is required to add a {kind}"),
    }
}

fn tag_all(tags: &mut Vec<String>, new: &[String]) {
    for tag in new {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
}

/// Checks that `item` carries what `kind` needs before anything is loaded.
pub fn check_new_item(kind: EmbeddedKind, item: &NewItem) -> Result<()> {
    match kind {
        EmbeddedKind::Pic => required(&item.url, "url", kind).map(drop),
        EmbeddedKind::Material | EmbeddedKind::Link => {
            required(&item.name, "name", kind)?;
            required(&item.url, "url", kind).map(drop)
        }
        EmbeddedKind::Track => required(&item.path, "path", kind).map(drop),
    }
}

fn field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Builds and appends the item. Required fields were checked by
/// [`check_new_item`] beforehand.
fn add_item(
    object: &mut MultimediaObject,
    kind: EmbeddedKind,
    id: EmbeddedId,
    item: &NewItem,
) -> ModelResult<()> {
    match kind {
        EmbeddedKind::Pic => {
            let mut pic = Pic::new(id, field(&item.url));
            pic.path.clone_from(&item.path);
            pic.hide = item.hide;
            tag_all(&mut pic.tags, &item.tags);
            object.add_pic(pic)
        }
        EmbeddedKind::Material => {
            let mut material = Material::new(id, field(&item.name), field(&item.url));
            material.path.clone_from(&item.path);
            material.mime_type.clone_from(&item.mime_type);
            material.hide = item.hide;
            tag_all(&mut material.tags, &item.tags);
            object.add_material(material)
        }
        EmbeddedKind::Link => {
            let mut link = Link::new(id, field(&item.name), field(&item.url));
            tag_all(&mut link.tags, &item.tags);
            object.add_link(link)
        }
        EmbeddedKind::Track => {
            let mut track = Track::new(id, field(&item.path));
            track.url.clone_from(&item.url);
            track.language.clone_from(&item.language);
            track.mime_type.clone_from(&item.mime_type);
            track.duration = item.duration.unwrap_or(0);
            track.only_audio = item.only_audio;
            track.hide = item.hide;
            tag_all(&mut track.tags, &item.tags);
            object.add_track(track)
        }
    }
}

/// Appends a new item of `kind` and returns its freshly minted id.
pub fn add_embedded(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    ids: &dyn IdGenerator,
    object_id: &MultimediaObjectId,
    kind: EmbeddedKind,
    item: &NewItem,
) -> Result<EmbeddedId> {
    check_new_item(kind, item)?;
    let id = ids.new_id();
    edit_object(gateway, object_id, max_attempts, |object| {
        Ok(add_item(object, kind, id, item)?)
    })?;
    info!(object_id = %object_id, item_id = %id, %kind, "Added embedded item");
    Ok(id)
}

/// Which reordering or removal to apply to an existing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemChange {
    Remove,
    Up,
    Down,
}

/// Applies `change` to item `item_id`. Returns false when nothing changed,
/// either because the item is unknown or it already sits at the boundary.
pub fn change_embedded(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    object_id: &MultimediaObjectId,
    kind: EmbeddedKind,
    item_id: &EmbeddedId,
    change: ItemChange,
) -> Result<bool> {
    let changed = edit_object(gateway, object_id, max_attempts, |object| {
        Ok(match change {
            ItemChange::Remove => object.remove_embedded(kind, item_id),
            ItemChange::Up => object.move_embedded_up(kind, item_id),
            ItemChange::Down => object.move_embedded_down(kind, item_id),
        })
    })?;
    Ok(changed)
}

fn summary<T: Tagged>(label: String, item: &T) -> String {
    if item.tags().is_empty() {
        label
    } else {
        format!("{label} [{}]", item.tags().join(", "))
    }
}

/// One line per item of `kind`, in display order.
pub fn list_embedded(object: &MultimediaObject, kind: EmbeddedKind) -> Vec<String> {
    match kind {
        EmbeddedKind::Pic => object
            .pics()
            .iter()
            .map(|p| format!("{}  {}", p.id(), summary(p.url.clone(), p)))
            .collect(),
        EmbeddedKind::Material => object
            .materials()
            .iter()
            .map(|m| format!("{}  {}", m.id(), summary(format!("{} <{}>", m.name, m.url), m)))
            .collect(),
        EmbeddedKind::Link => object
            .links()
            .iter()
            .map(|l| format!("{}  {}", l.id(), summary(format!("{} <{}>", l.name, l.url), l)))
            .collect(),
        EmbeddedKind::Track => object
            .tracks()
            .iter()
            .map(|t| format!("{}  {}", t.id(), summary(t.path.clone(), t)))
            .collect(),
    }
}

// ── People ───────────────────────────────────────────────────────

/// Credits a person. Without `--role` the auto-publisher role from the
/// schema config is used. Returns `None` if the person already holds the role.
pub fn add_person(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    schema: &SchemaConfig,
    object_id: &MultimediaObjectId,
    new: &NewPerson,
) -> Result<Option<PersonId>> {
    let name = new.name.trim();
    if name.is_empty() {
        bail!("--name is required to add a person");
    }
    let person_id = match new.person.as_deref() {
        Some(raw) => parse_person_id(raw)?,
        None => PersonId::new(),
    };
    let mut person = EmbeddedPerson::new(person_id, name);
    person.email.clone_from(&new.email);
    let role = new.role.as_ref().map(|cod| {
        Role::new(cod.as_str(), new.role_name.as_deref().unwrap_or(cod.as_str()))
    });

    let added = edit_object(gateway, object_id, max_attempts, |object| {
        let added = match &role {
            Some(role) => object.add_person_with_role(person.clone(), role)?,
            None => object.add_auto_publisher(person.clone(), schema)?,
        };
        Ok(added)
    })?;
    if added {
        info!(object_id = %object_id, person_id = %person_id, "Added person");
    }
    Ok(added.then_some(person_id))
}

/// Applies `change` to a person within role `cod`. Returns false when nothing
/// changed.
pub fn change_person(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    object_id: &MultimediaObjectId,
    person_id: &PersonId,
    cod: &str,
    change: ItemChange,
) -> Result<bool> {
    let changed = edit_object(gateway, object_id, max_attempts, |object| {
        Ok(match change {
            ItemChange::Remove => object.remove_person_with_role(person_id, cod),
            ItemChange::Up => object.up_person_with_role(person_id, cod),
            ItemChange::Down => object.down_person_with_role(person_id, cod),
        })
    })?;
    Ok(changed)
}

/// One header line per role followed by its people, in display order.
pub fn list_people(object: &MultimediaObject) -> Vec<String> {
    let mut lines = Vec::new();
    for role in object.people() {
        lines.push(format!("{} ({})", role.cod(), role.name));
        for person in role.people() {
            match &person.email {
                Some(email) => lines.push(format!("  {}  {} <{email}>", person.id(), person.name)),
                None => lines.push(format!("  {}  {}", person.id(), person.name)),
            }
        }
    }
    lines
}

// ── Broadcast ────────────────────────────────────────────────────

/// Replaces the object's broadcast. Returns the type actually stored, which
/// is public for unknown codes. A password is only kept for password
/// broadcasts and groups only for group broadcasts.
pub fn set_broadcast(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    object_id: &MultimediaObjectId,
    code: &str,
    password: Option<&str>,
    groups: &[String],
) -> Result<BroadcastType> {
    let broadcast_type = BroadcastType::from_code(code);
    let mut broadcast = EmbeddedBroadcast::for_type(broadcast_type);
    if broadcast_type == BroadcastType::Password {
        broadcast.password = password.map(str::to_string);
    } else if password.is_some() {
        warn!(%broadcast_type, "Ignoring password for a broadcast that is not password protected");
    }
    if broadcast_type == BroadcastType::Groups {
        for group in groups {
            broadcast.add_group(group.clone());
        }
    } else if !groups.is_empty() {
        warn!(%broadcast_type, "Ignoring groups for a broadcast that is not group restricted");
    }
    edit_object(gateway, object_id, max_attempts, |object| {
        object.set_embedded_broadcast(broadcast.clone_resource());
        Ok(())
    })?;
    Ok(broadcast_type)
}

// ── Segments ─────────────────────────────────────────────────────

/// What `import-segments` found or wrote for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentImport {
    pub object_id: MultimediaObjectId,
    /// Segments in the media package, `None` when it has no segment list.
    pub found: Option<usize>,
    pub imported: bool,
}

/// Reads segments from `media_package` and, when `force` is set, replaces
/// the object's segments with them. An empty or missing list writes nothing.
pub fn import_segments(
    gateway: &dyn MultimediaObjectGateway,
    max_attempts: u32,
    object_id: &MultimediaObjectId,
    media_package: &Value,
    force: bool,
) -> Result<SegmentImport> {
    let segments = segments_from_media_package(media_package)?;
    let found = segments.as_ref().map(Vec::len);

    let imported = match segments {
        Some(segments) if force && !segments.is_empty() => {
            edit_object(gateway, object_id, max_attempts, |object| {
                object.set_embedded_segments(segments.clone());
                Ok(())
            })?;
            info!(object_id = %object_id, count = segments.len(), "Imported segments");
            true
        }
        _ => {
            // Report mode still requires the object to exist.
            gateway.load(object_id)?;
            false
        }
    };

    Ok(SegmentImport {
        object_id: *object_id,
        found,
        imported,
    })
}

// ── Workflow ─────────────────────────────────────────────────────

pub fn run_workflow<Q: JobQueue>(
    gateway: &dyn MultimediaObjectGateway,
    service: &WorkflowService<Q>,
    object_id: &MultimediaObjectId,
) -> Result<Option<JobOutcome>> {
    let object = gateway.load(object_id)?;
    Ok(service.on_multimedia_object_update(&object)?)
}
