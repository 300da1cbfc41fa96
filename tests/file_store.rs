use hbnb_api::{Entity, FileStore, Kind, Storage};
use serde_json::{json, Value};

fn build(kind: Kind, payload: Value) -> Entity {
    Entity::build(kind, payload.as_object().expect("object payload")).expect("valid entity")
}

#[tokio::test]
async fn reload_preserves_entities_and_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("file.json");

    let store = FileStore::open(&path).await.expect("missing file opens empty");
    assert_eq!(store.count(Kind::State).await.unwrap(), 0);

    let ca = build(Kind::State, json!({"name": "CA"}));
    let ny = build(Kind::State, json!({"name": "NY"}));
    let wifi = build(Kind::Amenity, json!({"name": "Wifi"}));
    for e in [&ca, &ny, &wifi] {
        store.save(e).await.unwrap();
    }
    let mut renamed = ca.clone();
    renamed.set_field("name", &json!("California")).unwrap();
    store.save(&renamed).await.unwrap();

    let reopened = FileStore::open(&path).await.expect("reload");
    let states = reopened.all(Kind::State).await.unwrap();
    assert_eq!(states, vec![renamed.clone(), ny.clone()]);
    assert_eq!(reopened.get(Kind::Amenity, wifi.id()).await.unwrap(), Some(wifi));
}

#[tokio::test]
async fn file_uses_class_dot_id_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("file.json");
    let store = FileStore::open(&path).await.unwrap();
    let ca = build(Kind::State, json!({"name": "CA"}));
    store.save(&ca).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    let entry = &doc[format!("State.{}", ca.id())];
    assert_eq!(entry["__class__"], "State");
    assert_eq!(entry["name"], "CA");

    store.delete(&ca).await.unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&raw).unwrap(), json!({}));
}

#[tokio::test]
async fn mismatched_key_is_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("file.json");
    let ca = build(Kind::State, json!({"name": "CA"}));
    let doc = json!({ "State.wrong": ca.to_dict().unwrap() });
    std::fs::write(&path, doc.to_string()).unwrap();
    assert!(FileStore::open(&path).await.is_err());
}

#[tokio::test]
async fn failed_batch_delete_keeps_every_entity() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data_dir = dir.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();
    let store = FileStore::open(data_dir.join("file.json")).await.unwrap();

    let ca = build(Kind::State, json!({"name": "CA"}));
    let sf = build(Kind::City, json!({"name": "SF", "state_id": ca.id()}));
    let la = build(Kind::City, json!({"name": "LA", "state_id": ca.id()}));
    for e in [&ca, &sf, &la] {
        store.save(e).await.unwrap();
    }

    std::fs::remove_dir_all(&data_dir).unwrap();
    assert!(store.delete_many(&[sf.clone(), la.clone(), ca.clone()]).await.is_err());

    assert_eq!(store.all(Kind::City).await.unwrap(), vec![sf, la]);
    assert_eq!(store.all(Kind::State).await.unwrap(), vec![ca]);
}
