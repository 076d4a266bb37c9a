// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running, with
//! FIRESTORE_EMULATOR_HOST pointing at it. Without it every test is skipped.
//!
//! IDs carry a nanosecond suffix so runs against a shared emulator do not
//! collide.

use chrono::TimeZone;
use ontime_tracker::db::DocumentStore;
use ontime_tracker::models::{BucketItem, TaskLogRecord, TaskLogUpdate, TaskQuery, UserProfile};

mod common;
use common::test_db;

fn unique(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

fn task(user_id: &str, title: &str, date: &str) -> TaskLogRecord {
    TaskLogRecord {
        id: String::new(),
        user_id: user_id.to_string(),
        user_name: "Integration".to_string(),
        task_title: title.to_string(),
        description: format!("{title} work"),
        date: date.to_string(),
        time: "10:00 AM".to_string(),
    }
}

fn bucket_item(
    user_id: &str,
    name: &str,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
) -> BucketItem {
    BucketItem {
        id: String::new(),
        user_id: user_id.to_string(),
        project_name: name.to_string(),
        description: "later".to_string(),
        created_at,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_upsert_merges_fields() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique("uid");

    assert!(db.get_user(&uid).await.unwrap().is_none());

    db.upsert_user(&UserProfile {
        user_id: uid.clone(),
        user_name: "Nadia".to_string(),
        email: Some("nadia@example.com".to_string()),
        photo_url: Some("https://example.com/n.png".to_string()),
    })
    .await
    .unwrap();

    // Second sign-in without a photo must not clear the stored one
    db.upsert_user(&UserProfile {
        user_id: uid.clone(),
        user_name: "Nadia K.".to_string(),
        email: None,
        photo_url: None,
    })
    .await
    .unwrap();

    let fetched = db.get_user(&uid).await.unwrap().unwrap();
    assert_eq!(fetched.user_name, "Nadia K.");
    assert_eq!(fetched.email.as_deref(), Some("nadia@example.com"));
    assert_eq!(fetched.photo_url.as_deref(), Some("https://example.com/n.png"));

    let all = db.list_users().await.unwrap();
    assert!(all.iter().any(|u| u.user_id == uid));
}

// ═══════════════════════════════════════════════════════════════════════════
// TASK LOG TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_task_insert_and_equality_query() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique("uid");

    let id = db
        .insert_task(&task(&uid, "API", "2024-05-01"))
        .await
        .unwrap();
    db.insert_task(&task(&uid, "Docs", "2024-05-01"))
        .await
        .unwrap();
    db.insert_task(&task(&uid, "API", "2024-04-30"))
        .await
        .unwrap();

    let fetched = db.get_task(&id).await.unwrap().unwrap();
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.task_title, "API");

    let today = db
        .find_tasks(&TaskQuery::for_user(&uid).on_date("2024-05-01"))
        .await
        .unwrap();
    assert_eq!(today.len(), 2);

    let duplicates = db
        .find_tasks(
            &TaskQuery::for_user(&uid)
                .on_date("2024-05-01")
                .titled("API"),
        )
        .await
        .unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].id, id);
}

#[tokio::test]
async fn test_task_update_touches_only_editable_fields() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique("uid");
    let id = db
        .insert_task(&task(&uid, "API", "2024-05-01"))
        .await
        .unwrap();

    db.update_task(
        &id,
        &TaskLogUpdate {
            task_title: "API v2".to_string(),
            description: "Reworked".to_string(),
        },
    )
    .await
    .unwrap();

    let fetched = db.get_task(&id).await.unwrap().unwrap();
    assert_eq!(fetched.task_title, "API v2");
    assert_eq!(fetched.description, "Reworked");
    assert_eq!(fetched.user_id, uid);
    assert_eq!(fetched.date, "2024-05-01");
    assert_eq!(fetched.time, "10:00 AM");
}

#[tokio::test]
async fn test_task_delete() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique("uid");
    let id = db
        .insert_task(&task(&uid, "Throwaway", "2024-05-01"))
        .await
        .unwrap();

    db.delete_task(&id).await.unwrap();

    assert!(db.get_task(&id).await.unwrap().is_none());
    let all = db.list_tasks().await.unwrap();
    assert!(all.iter().all(|t| t.id != id));
}

// ═══════════════════════════════════════════════════════════════════════════
// BUCKET TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_bucket_items_scoped_by_user() {
    require_emulator!();

    let db = test_db().await;
    let mine = unique("uid");
    let theirs = unique("uid");

    let id = db
        .insert_bucket_item(&bucket_item(&mine, "Refactor", None))
        .await
        .unwrap()
        .id;
    db.insert_bucket_item(&bucket_item(&theirs, "Other", None))
        .await
        .unwrap();

    let listed = db.list_bucket_items(&mine).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);

    db.delete_bucket_item(&id).await.unwrap();
    assert!(db.get_bucket_item(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_bucket_created_at_is_server_assigned() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique("uid");
    let stale = chrono::Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
    let before = chrono::Utc::now() - chrono::Duration::minutes(5);

    let first = db
        .insert_bucket_item(&bucket_item(&uid, "First", Some(stale)))
        .await
        .unwrap();
    let second = db
        .insert_bucket_item(&bucket_item(&uid, "Second", None))
        .await
        .unwrap();

    let first_at = first.created_at.unwrap();
    assert!(first_at > before, "caller-supplied createdAt was kept");
    assert!(second.created_at.unwrap() > first_at);

    let fetched = db.get_bucket_item(&first.id).await.unwrap().unwrap();
    assert_eq!(fetched.created_at, first.created_at);
}
