// ABOUTME: Integration tests for workout storage: weekly listing, upserts, sections
// ABOUTME: Also covers owner scoping and regeneration history records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use wodforge::models::{SectionKind, Weekday, WorkoutSections};

#[tokio::test]
async fn empty_week_is_ok_not_an_error() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();

    let week = database.list_week(user.id).await.unwrap();
    assert!(week.is_empty());
}

#[tokio::test]
async fn list_week_returns_at_most_five_weekday_rows() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();

    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();

    let listed = database.list_week(user.id).await.unwrap();
    assert_eq!(listed.len(), 5);

    let mut days: Vec<Weekday> = listed.iter().map(|w| w.day).collect();
    days.sort();
    assert_eq!(days, Weekday::ALL.to_vec());
}

#[tokio::test]
async fn list_week_is_scoped_to_the_owner() {
    let database = common::create_test_database().await.unwrap();
    let alice = common::create_test_user(&database).await.unwrap();
    let bob = common::create_test_user(&database).await.unwrap();

    database
        .upsert_week(&common::sample_week(alice.id))
        .await
        .unwrap();

    assert_eq!(database.list_week(alice.id).await.unwrap().len(), 5);
    assert!(database.list_week(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn upsert_week_replaces_rows_by_id() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();

    let mut week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();

    week[0].wod = "Updated Monday WOD".to_owned();
    database.upsert_week(&week).await.unwrap();

    let reloaded = database
        .get_workout(user.id, week[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.wod, "Updated Monday WOD");
    assert_eq!(database.list_week(user.id).await.unwrap().len(), 5);
}

#[tokio::test]
async fn get_workout_scoped_to_owner_reads_as_missing() {
    let database = common::create_test_database().await.unwrap();
    let alice = common::create_test_user(&database).await.unwrap();
    let bob = common::create_test_user(&database).await.unwrap();

    let week = common::sample_week(alice.id);
    database.upsert_week(&week).await.unwrap();

    assert!(database
        .get_workout(alice.id, week[0].id)
        .await
        .unwrap()
        .is_some());
    assert!(database
        .get_workout(bob.id, week[0].id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_section_touches_only_the_named_column() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();

    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();

    let updated = database
        .update_section(user.id, week[0].id, SectionKind::Notes, "fresh notes")
        .await
        .unwrap();
    assert!(updated);

    let reloaded = database
        .get_workout(user.id, week[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.notes, "fresh notes");
    assert_eq!(reloaded.warmup, week[0].warmup);
    assert_eq!(reloaded.wod, week[0].wod);
}

#[tokio::test]
async fn update_section_on_foreign_workout_affects_nothing() {
    let database = common::create_test_database().await.unwrap();
    let alice = common::create_test_user(&database).await.unwrap();
    let bob = common::create_test_user(&database).await.unwrap();

    let week = common::sample_week(alice.id);
    database.upsert_week(&week).await.unwrap();

    let updated = database
        .update_section(bob.id, week[0].id, SectionKind::Wod, "hijacked")
        .await
        .unwrap();
    assert!(!updated);

    let reloaded = database
        .get_workout(alice.id, week[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.wod, week[0].wod);
}

#[tokio::test]
async fn update_sections_replaces_all_three_at_once() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();

    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();

    let sections = WorkoutSections {
        warmup: "new warmup".to_owned(),
        wod: "new wod".to_owned(),
        notes: "new notes".to_owned(),
    };
    let updated = database
        .update_sections(user.id, week[2].id, &sections)
        .await
        .unwrap();
    assert!(updated);

    let reloaded = database
        .get_workout(user.id, week[2].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.sections(), sections);
}

#[tokio::test]
async fn store_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("nested").join("wodforge.db");
    let url = format!("sqlite:{}", path.display());

    // A fresh install points at a directory that does not exist yet
    let database = wodforge::database::Database::new(&url).await.unwrap();
    database.ping().await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn file_backed_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("wodforge.db").display());

    let user_id;
    {
        let database = wodforge::database::Database::new(&url).await.unwrap();
        let user = common::create_test_user(&database).await.unwrap();
        user_id = user.id;
        database
            .upsert_week(&common::sample_week(user.id))
            .await
            .unwrap();
    }

    // A fresh connection to the same file sees the data
    let database = wodforge::database::Database::new(&url).await.unwrap();
    assert_eq!(database.list_week(user_id).await.unwrap().len(), 5);
}

#[tokio::test]
async fn history_records_come_back_newest_first() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();

    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();
    let workout_id = week[0].id;

    database
        .save_workout_history(workout_id, user.id, "make it harder", "old wod", "mid wod")
        .await
        .unwrap();
    database
        .save_workout_history(workout_id, user.id, "even harder", "mid wod", "new wod")
        .await
        .unwrap();

    let entries = database
        .list_workout_history(user.id, workout_id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].prompt, "even harder");
    assert_eq!(entries[0].previous_wod, "mid wod");
    assert_eq!(entries[1].prompt, "make it harder");
}
