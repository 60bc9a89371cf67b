//! Optimistic update guarding against an in-memory store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use gatehouse::error::GovernanceError;
use gatehouse::mutation::{FieldPatch, StoreError, UpdateGuard, Versioned, VersionedStore};

#[derive(Debug, Clone, PartialEq)]
struct Widget {
    name: String,
    price: f64,
    version: i64,
}

impl Versioned for Widget {
    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

/// Store backed by a mutex-held map; the conditional update matches on id
/// and expected version, the way the production SQL does.
#[derive(Clone, Default)]
struct MemStore {
    rows: Arc<Mutex<HashMap<i64, Widget>>>,
    call_delay: Option<Duration>,
}

impl MemStore {
    fn seeded(id: i64, widget: Widget) -> Self {
        let store = Self::default();
        store.rows.lock().unwrap().insert(id, widget);
        store
    }
}

#[async_trait]
impl VersionedStore for MemStore {
    type Id = i64;
    type Record = Widget;

    async fn get(&self, id: &i64) -> Result<Option<Widget>, StoreError> {
        if let Some(delay) = self.call_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn update(
        &self,
        id: &i64,
        expected_version: i64,
        record: &Widget,
    ) -> Result<Option<i64>, StoreError> {
        if let Some(delay) = self.call_delay {
            tokio::time::sleep(delay).await;
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(id) {
            Some(row) if row.version == expected_version => {
                let new_version = expected_version + 1;
                *row = Widget {
                    version: new_version,
                    ..record.clone()
                };
                Ok(Some(new_version))
            }
            _ => Ok(None),
        }
    }
}

fn widget(version: i64) -> Widget {
    Widget {
        name: "widget".to_string(),
        price: 9.99,
        version,
    }
}

fn guard(store: MemStore) -> UpdateGuard<MemStore> {
    UpdateGuard::with_timeout(store, Duration::from_secs(3))
}

#[tokio::test]
async fn apply_adopts_the_store_reported_version() {
    let guard = guard(MemStore::seeded(1, widget(1)));

    let mut record = guard.get(&1).await.unwrap();
    record.name = "renamed".to_string();

    let new_version = guard.apply(&1, &mut record).await.unwrap();
    assert_eq!(new_version, 2);
    assert_eq!(record.version, 2);

    let reread = guard.get(&1).await.unwrap();
    assert_eq!(reread.name, "renamed");
    assert_eq!(reread.version, 2);
}

#[tokio::test]
async fn missing_record_reports_not_found() {
    let guard = guard(MemStore::default());

    assert!(matches!(
        guard.get(&7).await,
        Err(GovernanceError::NotFound)
    ));

    let mut record = widget(1);
    assert!(matches!(
        guard.apply(&7, &mut record).await,
        Err(GovernanceError::NotFound)
    ));
}

#[tokio::test]
async fn racing_writers_produce_exactly_one_success() {
    let store = MemStore::seeded(1, widget(1));
    let guard = Arc::new(guard(store));

    // Both tasks read the record at version 1 and race their commits.
    let mut first = widget(1);
    first.name = "first".to_string();
    let mut second = widget(1);
    second.name = "second".to_string();

    let g1 = Arc::clone(&guard);
    let g2 = Arc::clone(&guard);
    let (a, b) = tokio::join!(
        async move {
            let mut record = first;
            g1.apply(&1, &mut record).await
        },
        async move {
            let mut record = second;
            g2.apply(&1, &mut record).await
        },
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one writer may win");

    let loser = if a.is_ok() { b } else { a };
    assert!(
        matches!(loser, Err(GovernanceError::EditConflict)),
        "the loser must see an explicit conflict, not a silent success"
    );

    // The winner's version is the store's, and only one increment happened.
    let committed = guard.get(&1).await.unwrap();
    assert_eq!(committed.version, 2);
}

#[tokio::test]
async fn conflict_is_terminal_until_reread() {
    let store = MemStore::seeded(1, widget(1));
    let guard = guard(store);

    let mut stale = widget(1);
    let mut current = guard.get(&1).await.unwrap();
    current.price = 19.99;
    guard.apply(&1, &mut current).await.unwrap();

    // The stale copy keeps conflicting until its holder re-reads.
    stale.name = "stale edit".to_string();
    assert!(matches!(
        guard.apply(&1, &mut stale).await,
        Err(GovernanceError::EditConflict)
    ));

    let mut fresh = guard.get(&1).await.unwrap();
    fresh.name = "stale edit".to_string();
    assert_eq!(guard.apply(&1, &mut fresh).await.unwrap(), 3);
}

#[tokio::test]
async fn partial_update_applies_only_supplied_fields() {
    #[derive(Debug, Deserialize, Default)]
    struct WidgetPatch {
        #[serde(default)]
        name: FieldPatch<String>,
        #[serde(default)]
        price: FieldPatch<f64>,
    }

    let guard = guard(MemStore::seeded(1, widget(1)));
    let patch: WidgetPatch = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();

    let mut record = guard.get(&1).await.unwrap();
    patch.name.apply_to(&mut record.name);
    patch.price.apply_to(&mut record.price);

    assert_eq!(guard.apply(&1, &mut record).await.unwrap(), 2);

    let reread = guard.get(&1).await.unwrap();
    assert_eq!(reread.name, "widget", "absent field stays untouched");
    assert_eq!(reread.price, 12.5);
    assert_eq!(reread.version, 2);
}

#[tokio::test(start_paused = true)]
async fn slow_store_calls_hit_the_deadline() {
    let mut store = MemStore::seeded(1, widget(1));
    store.call_delay = Some(Duration::from_secs(10));
    let guard = UpdateGuard::with_timeout(store, Duration::from_secs(3));

    match guard.get(&1).await {
        Err(GovernanceError::StoreTimeout(timeout)) => {
            assert_eq!(timeout, Duration::from_secs(3));
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}
