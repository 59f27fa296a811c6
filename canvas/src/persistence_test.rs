#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::catalog::FurnitureTemplate;
use crate::consts::{MIN_ITEM_SIZE, ZOOM_MAX};
use crate::storage::MemoryStore;

fn service() -> PersistenceService<MemoryStore> {
    PersistenceService::new(MemoryStore::new())
}

fn service_with(key: &str, raw: &str) -> PersistenceService<MemoryStore> {
    let mut store = MemoryStore::new();
    store.set(key, raw).unwrap();
    PersistenceService::new(store)
}

// =============================================================
// Scenes
// =============================================================

#[test]
fn missing_scenes_yield_one_default_scene() {
    let store = service().load_scenes();
    assert_eq!(store.len(), 1);
    assert!(store.active().furniture.is_empty());
}

#[test]
fn malformed_scenes_yield_one_default_scene() {
    let store = service_with(SCENES_KEY, "{oops").load_scenes();
    assert_eq!(store.len(), 1);
}

#[test]
fn empty_scene_array_yields_one_default_scene() {
    let store = service_with(SCENES_KEY, "[]").load_scenes();
    assert_eq!(store.len(), 1);
}

#[test]
fn saved_scenes_load_back_identically() {
    let mut scenes = SceneStore::new();
    let t = FurnitureTemplate { name: "Desk".into(), image: "/desk.png".into(), width: 120.0, height: 60.0 };
    scenes.active_mut().add_furniture(&t, Point::new(5.0, 6.0), 1.25);
    scenes.create_scene();
    scenes.toggle_grid();

    let mut svc = service();
    svc.save_scenes(scenes.scenes()).unwrap();
    let loaded = svc.load_scenes();
    assert_eq!(loaded.scenes(), scenes.scenes());
    assert_eq!(loaded.active_id(), scenes.scenes()[0].id);
}

#[test]
fn out_of_range_stored_scenes_are_normalised_on_load() {
    let raw = r#"[{
        "id": "6f1c2a52-6c1e-4c55-9a0e-2d2c4f0b9a11",
        "name": "Scene 1",
        "furniture": [{
            "id": "0b7e0d0c-1f4a-4d1b-8a63-3f7c9c1d2e44",
            "name": "Desk",
            "image": "/desk.png",
            "x": 10, "y": 20,
            "width": 5, "height": 40,
            "rotation": 725,
            "baseWidth": 120, "baseHeight": 60
        }],
        "background": null,
        "scale": 10,
        "showGrid": false,
        "snapEnabled": false
    }]"#;
    let store = service_with(SCENES_KEY, raw).load_scenes();
    let scene = store.active();
    assert_eq!(scene.scale, ZOOM_MAX);
    let item = &scene.furniture[0];
    assert_eq!(item.width, MIN_ITEM_SIZE);
    assert_eq!(item.height, 40.0);
    assert_eq!(item.rotation, 5.0);
}

// =============================================================
// Custom backgrounds
// =============================================================

#[test]
fn custom_backgrounds_start_empty() {
    assert!(service().load_custom_backgrounds().is_empty());
}

#[test]
fn malformed_custom_backgrounds_are_ignored() {
    assert!(service_with(CUSTOM_BACKGROUNDS_KEY, "nope").load_custom_backgrounds().is_empty());
}

#[test]
fn add_custom_background_appends() {
    let mut svc = service();
    svc.add_custom_background(Background::uploaded("a", "data:a", 10.0, 10.0)).unwrap();
    let all = svc.add_custom_background(Background::uploaded("b", "data:b", 20.0, 20.0)).unwrap();
    assert_eq!(all.len(), 2);
    let loaded = svc.load_custom_backgrounds();
    assert_eq!(loaded, all);
    assert_eq!(loaded[1].name, "b");
    assert!(loaded.iter().all(|bg| bg.is_uploaded));
}

#[test]
fn remove_custom_background_by_id() {
    let mut svc = service();
    let bg = Background::uploaded("a", "data:a", 10.0, 10.0);
    let id = bg.id.clone();
    svc.add_custom_background(bg).unwrap();
    let removed = svc.remove_custom_background(&id).unwrap();
    assert_eq!(removed.map(|b| b.id), Some(id.clone()));
    assert!(svc.load_custom_backgrounds().is_empty());
    assert!(svc.remove_custom_background(&id).unwrap().is_none());
}

// =============================================================
// Welcome flag
// =============================================================

#[test]
fn welcome_flag_round_trip() {
    let mut svc = service();
    assert!(!svc.has_seen_welcome());
    svc.mark_welcome_seen().unwrap();
    assert!(svc.has_seen_welcome());
    assert_eq!(svc.store().get(WELCOME_SEEN_KEY).unwrap().as_deref(), Some("true"));
}
