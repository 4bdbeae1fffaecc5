use pumukit_model::{EmbeddedKind, EmbeddedPerson, MultimediaObject, Pic, Role, Status, Track};
use pumukit_storage::{
    MultimediaObjectGateway, SqliteObjectStore, StorageConfig, StorageError, edit_object,
};
use pumukit_types::{EmbeddedId, IdGenerator, MultimediaObjectId, PersonId, SeriesId, SequentialGenerator};
use std::cell::Cell;

fn stored_object(store: &SqliteObjectStore, title: &str) -> MultimediaObject {
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), title);
    store.save(&mut mm).unwrap();
    mm
}

// ── load / save ──────────────────────────────────────────────────

#[test]
fn save_new_object_and_load_it_back() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let ids = SequentialGenerator::new();
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "Lecture");
    let a = ids.new_id();
    let b = ids.new_id();
    mm.add_pic(Pic::new(a, "/a.jpg")).unwrap();
    mm.add_pic(Pic::new(b, "/b.jpg")).unwrap();

    store.save(&mut mm).unwrap();
    assert_eq!(mm.version, 1);

    let loaded = store.load(&mm.id).unwrap();
    assert_eq!(loaded, mm);
    assert_eq!(loaded.embedded_ids(EmbeddedKind::Pic), vec![a, b]);
}

#[test]
fn load_missing_is_not_found() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let id = MultimediaObjectId::new();
    assert!(matches!(store.load(&id), Err(StorageError::NotFound(missing)) if missing == id));
}

#[test]
fn each_save_bumps_version() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mut mm = stored_object(&store, "v");
    mm.title = "v2".to_string();
    store.save(&mut mm).unwrap();
    mm.title = "v3".to_string();
    store.save(&mut mm).unwrap();
    assert_eq!(mm.version, 3);
    assert_eq!(store.load(&mm.id).unwrap().version, 3);
    assert_eq!(store.load(&mm.id).unwrap().title, "v3");
}

#[test]
fn mutations_are_not_persisted_until_saved() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "lazy");

    let mut working = store.load(&mm.id).unwrap();
    working.add_track(Track::new(EmbeddedId::new(), "/t.mp4")).unwrap();
    assert!(store.load(&mm.id).unwrap().tracks().is_empty());

    store.save(&mut working).unwrap();
    assert_eq!(store.load(&mm.id).unwrap().tracks().len(), 1);
}

#[test]
fn batch_of_reorders_is_a_single_save() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let ids = SequentialGenerator::new();
    let (a, b, c) = (ids.new_id(), ids.new_id(), ids.new_id());
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "batch");
    for id in [a, b, c] {
        mm.add_track(Track::new(id, format!("/{id}.mp4"))).unwrap();
    }
    store.save(&mut mm).unwrap();

    mm.remove_track_by_id(&b);
    mm.up_track_by_id(&c);
    store.save(&mut mm).unwrap();

    let loaded = store.load(&mm.id).unwrap();
    assert_eq!(loaded.version, 2);
    assert_eq!(loaded.embedded_ids(EmbeddedKind::Track), vec![c, a]);
}

#[test]
fn payload_edit_through_accessor_stays_loadable() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let ids = SequentialGenerator::new();
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "Pics");
    let a = ids.new_id();
    let b = ids.new_id();
    mm.add_pic(Pic::new(a, "/a.jpg")).unwrap();
    mm.add_pic(Pic::new(b, "/b.jpg")).unwrap();
    store.save(&mut mm).unwrap();

    mm.pic_by_id_mut(&b).unwrap().url = "/a.jpg".to_string();
    store.save(&mut mm).unwrap();

    let loaded = store.load(&mm.id).unwrap();
    assert_eq!(loaded.embedded_ids(EmbeddedKind::Pic), vec![a, b]);
    assert_eq!(loaded.pic_by_id(&b).unwrap().url, "/a.jpg");
}

#[test]
fn people_survive_save_and_load() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "Credits");
    let ned = EmbeddedPerson::new(PersonId::new(), "Ned");
    mm.add_person_with_role(ned.clone(), &Role::new("lord", "Lord")).unwrap();
    store.save(&mut mm).unwrap();

    let loaded = store.load(&mm.id).unwrap();
    assert!(loaded.contains_person_with_role(ned.id(), "lord"));
}

// ── Optimistic concurrency ───────────────────────────────────────

#[test]
fn stale_save_is_conflict() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "shared");

    let mut first = store.load(&mm.id).unwrap();
    let mut second = store.load(&mm.id).unwrap();

    first.title = "first".to_string();
    store.save(&mut first).unwrap();

    second.title = "second".to_string();
    let err = store.save(&mut second).unwrap_err();
    assert!(matches!(
        err,
        StorageError::Conflict { expected: 1, found: 2, .. }
    ));
    assert_eq!(second.version, 1);
    assert_eq!(store.load(&mm.id).unwrap().title, "first");
}

#[test]
fn inserting_existing_id_is_conflict() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "original");

    let mut impostor = MultimediaObject::new(mm.id, "impostor");
    let err = store.save(&mut impostor).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(store.load(&mm.id).unwrap().title, "original");
}

#[test]
fn saving_deleted_object_is_not_found() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mut mm = stored_object(&store, "gone");
    assert!(store.delete(&mm.id).unwrap());

    mm.title = "still here?".to_string();
    assert!(matches!(store.save(&mut mm), Err(StorageError::NotFound(_))));
}

// ── delete / list ────────────────────────────────────────────────

#[test]
fn delete_is_idempotent() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "x");
    assert!(store.delete(&mm.id).unwrap());
    assert!(!store.delete(&mm.id).unwrap());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn list_ids_returns_all_objects() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let a = stored_object(&store, "a");
    let b = stored_object(&store, "b");
    let mut ids = store.list_ids().unwrap();
    ids.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(ids, expected);
    assert_eq!(store.count().unwrap(), 2);
}

// ── Series and status queries ────────────────────────────────────

fn in_series(store: &SqliteObjectStore, series: SeriesId, title: &str, status: Status) -> MultimediaObjectId {
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), title);
    mm.series_id = Some(series);
    mm.status = status;
    store.save(&mut mm).unwrap();
    mm.id
}

#[test]
fn list_by_series_keeps_insertion_order() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let main = SeriesId::new();
    let wall = SeriesId::new();
    let mm1 = in_series(&store, main, "MmObject 1", Status::Normal);
    let mm2 = in_series(&store, wall, "MmObject 2", Status::Normal);
    let mm3 = in_series(&store, main, "MmObject 3", Status::Normal);
    stored_object(&store, "no series");

    assert_eq!(store.list_by_series(&main).unwrap(), vec![mm1, mm3]);
    assert_eq!(store.list_by_series(&wall).unwrap(), vec![mm2]);
    assert!(store.list_by_series(&SeriesId::new()).unwrap().is_empty());
}

#[test]
fn find_with_status() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let series = SeriesId::new();
    let prototype = in_series(&store, series, "prototype", Status::Prototype);
    let new = in_series(&store, series, "new", Status::New);
    let hidden = in_series(&store, series, "hide", Status::Hidden);
    let blocked = in_series(&store, series, "bloq", Status::Blocked);
    let normal = in_series(&store, series, "normal", Status::Normal);
    in_series(&store, SeriesId::new(), "elsewhere", Status::Normal);

    assert_eq!(store.list_with_status(&series, &[Status::Prototype]).unwrap(), vec![prototype]);
    assert_eq!(store.list_with_status(&series, &[Status::Blocked]).unwrap(), vec![blocked]);
    assert_eq!(
        store.list_with_status(&series, &[Status::Prototype, Status::New]).unwrap(),
        vec![prototype, new]
    );
    assert_eq!(
        store
            .list_with_status(&series, &[Status::Normal, Status::New, Status::Hidden])
            .unwrap(),
        vec![new, hidden, normal]
    );
    assert!(store.list_with_status(&series, &[]).unwrap().is_empty());
}

#[test]
fn prototype_queries() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let series = SeriesId::new();
    assert_eq!(store.find_prototype(&series).unwrap(), None);

    let prototype = in_series(&store, series, "prototype", Status::Prototype);
    let others: Vec<_> = [Status::New, Status::Hidden, Status::Blocked, Status::Normal]
        .into_iter()
        .map(|status| in_series(&store, series, status.as_str(), status))
        .collect();

    assert_eq!(store.find_prototype(&series).unwrap(), Some(prototype));
    assert_eq!(store.list_without_prototype(&series).unwrap(), others);
}

#[test]
fn status_change_is_visible_after_save() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let series = SeriesId::new();
    let id = in_series(&store, series, "draft", Status::New);

    edit_object(&store, &id, 3, |mm| {
        mm.status = Status::Normal;
        Ok(())
    })
    .unwrap();

    assert!(store.list_with_status(&series, &[Status::New]).unwrap().is_empty());
    assert_eq!(store.list_with_status(&series, &[Status::Normal]).unwrap(), vec![id]);
}

// ── edit_object ──────────────────────────────────────────────────

#[test]
fn edit_object_loads_mutates_and_saves() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "edit");
    let pic = EmbeddedId::new();

    edit_object(&store, &mm.id, 3, |obj| {
        obj.add_pic(Pic::new(pic, "/p.jpg"))?;
        Ok(())
    })
    .unwrap();

    let loaded = store.load(&mm.id).unwrap();
    assert_eq!(loaded.version, 2);
    assert!(loaded.pic_by_id(&pic).is_some());
}

#[test]
fn edit_object_retries_after_conflict() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "contended");
    let attempts = Cell::new(0);

    edit_object(&store, &mm.id, 3, |obj| {
        attempts.set(attempts.get() + 1);
        if attempts.get() == 1 {
            // A concurrent writer sneaks in between our load and our save.
            let mut other = store.load(&obj.id)?;
            other.set_property("touched", true);
            store.save(&mut other)?;
        }
        obj.title = "mine".to_string();
        Ok(())
    })
    .unwrap();

    assert_eq!(attempts.get(), 2);
    let loaded = store.load(&mm.id).unwrap();
    assert_eq!(loaded.title, "mine");
    assert_eq!(loaded.property("touched"), Some(&serde_json::json!(true)));
    assert_eq!(loaded.version, 3);
}

#[test]
fn edit_object_gives_up_after_max_attempts() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "hot");
    let attempts = Cell::new(0);

    let err = edit_object(&store, &mm.id, 2, |obj| {
        attempts.set(attempts.get() + 1);
        let mut other = store.load(&obj.id)?;
        store.save(&mut other)?;
        Ok(())
    })
    .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(attempts.get(), 2);
}

#[test]
fn edit_object_propagates_edit_errors_without_saving() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let pic = EmbeddedId::new();
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "dup");
    mm.add_pic(Pic::new(pic, "/p.jpg")).unwrap();
    store.save(&mut mm).unwrap();

    let err = edit_object(&store, &mm.id, 3, |obj| {
        obj.title = "changed".to_string();
        obj.add_pic(Pic::new(pic, "/again.jpg"))?;
        Ok(())
    })
    .unwrap_err();

    assert!(matches!(err, StorageError::Model(_)));
    let loaded = store.load(&mm.id).unwrap();
    assert_eq!(loaded.title, "dup");
    assert_eq!(loaded.version, 1);
}

#[test]
fn edit_object_missing_is_not_found() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let result = edit_object(&store, &MultimediaObjectId::new(), 3, |_| Ok(()));
    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[test]
fn edit_object_through_trait_object() {
    let store = SqliteObjectStore::open_in_memory().unwrap();
    let mm = stored_object(&store, "dyn");
    let gateway: &dyn MultimediaObjectGateway = &store;
    let version = edit_object(gateway, &mm.id, 1, |obj| Ok(obj.version)).unwrap();
    assert_eq!(version, 1);
}

// ── On disk ──────────────────────────────────────────────────────

#[test]
fn objects_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("objects.db");
    let id;
    {
        let store = SqliteObjectStore::open(&path).unwrap();
        id = stored_object(&store, "persistent").id;
    }
    let store = SqliteObjectStore::open(&path).unwrap();
    let loaded = store.load(&id).unwrap();
    assert_eq!(loaded.title, "persistent");
    assert_eq!(loaded.version, 1);
}

#[test]
fn storage_config_defaults() {
    let config = StorageConfig::default();
    assert_eq!(config.path.to_str(), Some("pumukit.db"));
    assert_eq!(config.max_conflict_retries, 3);
}
