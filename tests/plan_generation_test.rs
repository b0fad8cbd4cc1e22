// ABOUTME: Integration tests for plan generation and regeneration orchestrators
// ABOUTME: Drives the flows with a scripted provider against an in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::ScriptedProvider;
use wodforge::models::{SectionKind, Weekday};
use wodforge::plan::{WeeklyPlanGenerator, WorkoutRegenerator};

#[tokio::test]
async fn generate_week_persists_five_days_in_weekday_order() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![common::scripted_week_response()]));

    let generator = WeeklyPlanGenerator::new(provider.clone(), database.clone());
    let workouts = generator
        .generate_week(user.id, "focus on kettlebells")
        .await
        .unwrap();

    let days: Vec<Weekday> = workouts.iter().map(|w| w.day).collect();
    assert_eq!(days, Weekday::ALL.to_vec());
    assert_eq!(workouts[0].wod, "Monday AMRAP");

    // Persisted too, not just returned
    assert_eq!(database.list_week(user.id).await.unwrap().len(), 5);

    // The user's request is embedded in the prompt sent to the model
    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].contains("focus on kettlebells"));
}

#[tokio::test]
async fn blank_prompt_is_rejected_before_any_model_call() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let provider = Arc::new(ScriptedProvider::failing());

    let generator = WeeklyPlanGenerator::new(provider.clone(), database);
    let err = generator.generate_week(user.id, "   ").await.unwrap_err();

    assert_eq!(err.http_status(), 400);
    assert!(provider.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unusable_model_output_is_an_upstream_error_and_persists_nothing() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![
        "I'd be happy to help, but I need more details.".to_owned(),
    ]));

    let generator = WeeklyPlanGenerator::new(provider, database.clone());
    let err = generator
        .generate_week(user.id, "anything")
        .await
        .unwrap_err();

    // The caller's request was fine; the model misbehaved
    assert_eq!(err.http_status(), 502);
    assert!(database.list_week(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn regenerate_workout_updates_sections_and_records_history() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();
    let target = &week[1];

    let provider = Arc::new(ScriptedProvider::new(vec![
        r#"Sure! {"warmup": "new warmup", "wod": "new wod", "notes": "new notes"}"#.to_owned(),
    ]));

    let regenerator = WorkoutRegenerator::new(provider.clone(), database.clone());
    let updated = regenerator
        .regenerate_workout(user.id, target.id, "make it harder")
        .await
        .unwrap();

    assert_eq!(updated.wod, "new wod");
    assert_eq!(updated.day, Weekday::Tuesday);

    let reloaded = database
        .get_workout(user.id, target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.warmup, "new warmup");
    assert_eq!(reloaded.notes, "new notes");

    let history = database
        .list_workout_history(user.id, target.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_wod, target.wod);
    assert_eq!(history[0].new_wod, "new wod");
    assert_eq!(history[0].prompt, "make it harder");

    // The prompt carried the current workout for context
    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].contains(&target.wod));
}

#[tokio::test]
async fn regeneration_with_empty_field_persists_nothing() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();
    let target = &week[0];

    let provider = Arc::new(ScriptedProvider::new(vec![
        r#"{"warmup": "new warmup", "wod": "", "notes": "new notes"}"#.to_owned(),
    ]));

    let regenerator = WorkoutRegenerator::new(provider, database.clone());
    let err = regenerator
        .regenerate_workout(user.id, target.id, "make it harder")
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 400);

    // No partial persistence: the workout is untouched
    let reloaded = database
        .get_workout(user.id, target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.sections(), target.sections());

    assert!(database
        .list_workout_history(user.id, target.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn regenerating_a_foreign_workout_reads_as_missing() {
    let database = common::create_test_database().await.unwrap();
    let alice = common::create_test_user(&database).await.unwrap();
    let bob = common::create_test_user(&database).await.unwrap();
    let week = common::sample_week(alice.id);
    database.upsert_week(&week).await.unwrap();

    let provider = Arc::new(ScriptedProvider::failing());
    let regenerator = WorkoutRegenerator::new(provider, database);

    let err = regenerator
        .regenerate_workout(bob.id, week[0].id, "steal this workout")
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn section_regeneration_rewrites_only_that_section() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();
    let target = &week[3];

    let provider = Arc::new(ScriptedProvider::new(vec![
        "**Rowing intervals** to prime the posterior chain".to_owned(),
    ]));

    let regenerator = WorkoutRegenerator::new(provider.clone(), database.clone());
    let updated = regenerator
        .regenerate_section(user.id, target.id, SectionKind::Warmup, "more rowing")
        .await
        .unwrap();

    // Markdown stripped, other sections untouched
    assert_eq!(
        updated.warmup,
        "Rowing intervals to prime the posterior chain"
    );
    assert_eq!(updated.wod, target.wod);
    assert_eq!(updated.notes, target.notes);

    // Warmup changes never hit WOD history
    assert!(database
        .list_workout_history(user.id, target.id)
        .await
        .unwrap()
        .is_empty());

    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].contains("warmup programming"));
}

#[tokio::test]
async fn wod_section_regeneration_records_history() {
    let database = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&database).await.unwrap();
    let week = common::sample_week(user.id);
    database.upsert_week(&week).await.unwrap();
    let target = &week[4];

    let provider = Arc::new(ScriptedProvider::new(vec![
        "EMOM 20: alternating devil press and double-unders".to_owned(),
    ]));

    let regenerator = WorkoutRegenerator::new(provider, database.clone());
    regenerator
        .regenerate_section(user.id, target.id, SectionKind::Wod, "no running")
        .await
        .unwrap();

    let history = database
        .list_workout_history(user.id, target.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_wod, target.wod);
}
