//! End-to-end session behavior over file-backed storage.

use rust_decimal::Decimal;
use std::fs;
use trolley::config::{CartConfig, StoreConfig};
use trolley::core::{CartItem, LineItem};
use trolley::session::CartSession;
use trolley::storage::{Encoding, FileStore, Store, StorageError};

fn apple() -> CartItem {
    CartItem::new("a", "Apple", Decimal::from(10))
}

fn pear() -> CartItem {
    CartItem::new("p", "Pear", Decimal::new(350, 2)).with_image("/img/pear.png")
}

#[test]
fn duplicate_add_then_drain_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(FileStore::new(dir.path()));

    session.add_to_cart(apple());
    session.add_to_cart(apple());
    assert_eq!(session.items(), &[apple()]);

    session.increase_quantity("a");
    assert_eq!(session.items()[0].quantity, 2);
    assert_eq!(session.total_price(), Decimal::from(20));

    session.decrease_quantity("a");
    session.decrease_quantity("a");
    assert!(session.items().is_empty());
    assert_eq!(session.total_price(), Decimal::ZERO);
    assert_eq!(session.total_quantity(), 0);

    let stored: Vec<CartItem> = FileStore::new(dir.path()).get("cart", vec![apple()]).unwrap();
    assert!(stored.is_empty());
}

#[test]
fn cart_survives_restart_in_both_encodings() {
    for encoding in [Encoding::Json, Encoding::Binary] {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut session = CartSession::open(FileStore::with_encoding(dir.path(), encoding));
            session.add_to_cart(apple());
            session.add_to_cart(pear());
            session.increase_quantity("p");
            session.increase_quantity("p");
        }

        let session: CartSession<CartItem, _> =
            CartSession::open(FileStore::with_encoding(dir.path(), encoding));

        assert_eq!(session.items().len(), 2, "encoding {encoding:?}");
        assert_eq!(session.items()[0], apple());
        assert_eq!(session.items()[1], pear().with_quantity(3));
        assert_eq!(session.total_price(), Decimal::new(2050, 2));
        assert_eq!(session.total_quantity(), 4);
    }
}

#[test]
fn insertion_order_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(FileStore::new(dir.path()));
    for id in ["c", "a", "b"] {
        session.add_to_cart(CartItem::new(id, id, Decimal::ONE));
    }
    session.remove_from_cart("a");
    session.add_to_cart(CartItem::new("a", "a", Decimal::ONE));
    drop(session);

    let session: CartSession<CartItem, _> = CartSession::open(FileStore::new(dir.path()));
    let ids: Vec<&str> = session.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["c", "b", "a"]);
}

#[test]
fn separate_keys_hold_separate_carts() {
    let dir = tempfile::tempdir().unwrap();

    let mut guest = CartSession::open_with_key(FileStore::new(dir.path()), "guest");
    guest.add_to_cart(apple());

    let mut member = CartSession::open_with_key(FileStore::new(dir.path()), "member");
    member.add_to_cart(pear());

    let guest: CartSession<CartItem, _> =
        CartSession::open_with_key(FileStore::new(dir.path()), "guest");
    assert_eq!(guest.items(), &[apple()]);
    assert!(!guest.is_added_to_cart("p"));
}

#[test]
fn corrupt_storage_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cart.json"), "garbage").unwrap();

    let mut session = CartSession::open(FileStore::new(dir.path()));
    assert!(session.items().is_empty());

    session.add_to_cart(apple());
    assert_eq!(fs::read_to_string(dir.path().join("cart.json")).unwrap(), "garbage");

    session.flush().unwrap();
    let stored: Vec<CartItem> = FileStore::new(dir.path()).get("cart", Vec::new()).unwrap();
    assert_eq!(stored, vec![apple()]);

    session.add_to_cart(pear());
    let stored: Vec<CartItem> = FileStore::new(dir.path()).get("cart", Vec::new()).unwrap();
    assert_eq!(stored, vec![apple(), pear()]);
}

#[test]
fn newer_envelope_is_not_overwritten_by_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    let newer = serde_json::json!({
        "version": 2,
        "key": "cart",
        "saved_at": "2026-01-01T00:00:00Z",
        "value": [{"id": "x", "name": "Saved", "price": "5", "quantity": 9}],
        "currency": "EUR"
    });
    fs::write(&path, serde_json::to_vec_pretty(&newer).unwrap()).unwrap();

    let mut session = CartSession::open(FileStore::new(dir.path()));
    assert!(session.items().is_empty());
    assert!(!session.is_persisting());

    session.add_to_cart(apple());
    session.increase_quantity("a");
    session.remove_from_cart("a");
    session.add_to_cart(pear());
    assert_eq!(session.items(), &[pear()]);

    let on_disk: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk, newer);

    let reread: Result<Vec<CartItem>, _> = FileStore::new(dir.path()).get("cart", Vec::new());
    assert!(matches!(
        reread,
        Err(StorageError::UnsupportedVersion { found: 2, supported: 1 })
    ));
}

#[test]
fn extreme_prices_survive_restart_without_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let gold = CartItem::new("gold", "Gold", Decimal::MAX);

    {
        let mut session = CartSession::open(FileStore::new(dir.path()));
        session.add_to_cart(gold.clone());
        session.add_to_cart(apple());
        session.increase_quantity("gold");
        assert_eq!(session.total_price(), Decimal::MAX);
    }

    let session: CartSession<CartItem, _> = CartSession::open(FileStore::new(dir.path()));
    assert_eq!(session.items(), &[gold.with_quantity(2), apple()]);
    assert_eq!(session.total_price(), Decimal::MAX);
    assert_eq!(session.total_quantity(), 3);
}

#[test]
fn flush_reports_unwritable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let mut session: CartSession<CartItem, _> = CartSession::open(FileStore::new(&blocker));
    session.add_to_cart(apple());
    assert_eq!(session.total_quantity(), 1);

    assert!(matches!(session.flush(), Err(StorageError::Io { .. })));
    assert!(!session.is_persisting());
}

#[test]
fn config_file_selects_binary_store() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let config_path = dir.path().join("trolley.toml");
    fs::write(
        &config_path,
        format!(
            "storage_key = \"cart\"\n\n[store]\nkind = \"file\"\ndir = {:?}\nencoding = \"binary\"\n",
            data_dir.display().to_string()
        ),
    )
    .unwrap();

    let config = CartConfig::load(&config_path).unwrap();
    assert!(matches!(
        config.store,
        StoreConfig::File {
            encoding: Encoding::Binary,
            ..
        }
    ));

    let mut session = CartSession::from_config(&config).unwrap();
    session.add_to_cart(pear());

    assert!(data_dir.join("cart.bin").exists());
    let stored: Vec<CartItem> = FileStore::with_encoding(&data_dir, Encoding::Binary)
        .get("cart", Vec::new())
        .unwrap();
    assert_eq!(stored, vec![pear()]);
}
