// ABOUTME: Seeds a demo account with the starter week of workouts
// ABOUTME: Useful for local development and screenshots without burning AI quota
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Demo Seed Binary
//!
//! Creates (or reuses) a demo user and writes the starter Monday-Friday week
//! so a fresh local install has something to show before the first
//! AI-generated plan.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use wodforge::{
    database::Database,
    logging,
    models::{User, Weekday, Workout, WorkoutSections},
};

#[derive(Parser)]
#[command(name = "seed-demo-workouts")]
#[command(about = "Seed a demo account with a starter week of workouts")]
struct Args {
    /// Database URL to seed
    #[arg(long, default_value = "sqlite:./data/wodforge.db")]
    database_url: String,

    /// Email for the demo account
    #[arg(long, default_value = "demo@wodforge.local")]
    email: String,
}

/// The starter week shipped with the original product
fn starter_week() -> [(Weekday, WorkoutSections); 5] {
    let s = |warmup: &str, wod: &str, notes: &str| WorkoutSections {
        warmup: warmup.to_owned(),
        wod: wod.to_owned(),
        notes: notes.to_owned(),
    };

    [
        (
            Weekday::Monday,
            s(
                "3 rounds of: 10 air squats, 10 sit-ups, 10 push-ups",
                "For Time: 21-15-9 Thrusters (95/65 lb), Pull-Ups",
                "Focus on keeping elbows high during thrusters.",
            ),
        ),
        (
            Weekday::Tuesday,
            s(
                "2 rounds of: 200m run, 10 walking lunges",
                "AMRAP 12: 10 Kettlebell Swings, 10 Box Jumps, 10 Push-Ups",
                "Aim for consistent pacing.",
            ),
        ),
        (
            Weekday::Wednesday,
            s(
                "3 rounds of: 10 shoulder pass-throughs, 10 PVC good mornings",
                "5 Rounds for Time: 200m Row, 15 Wall Balls, 10 Burpees",
                "Try to complete each round under 3 minutes.",
            ),
        ),
        (
            Weekday::Thursday,
            s(
                "2 rounds of: 10 banded pull-aparts, 5 inchworms",
                "EMOM 15: Odd minutes – 10 Deadlifts, Even minutes – Rest",
                "Focus on maintaining a neutral spine.",
            ),
        ),
        (
            Weekday::Friday,
            s(
                "3 rounds of: 10 glute bridges, 10 scap push-ups",
                "For Time: 800m Run, 50 Box Step-ups, 800m Run, 50 KB Swings",
                "Pace your run to maintain effort for box step-ups.",
            ),
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let database = Database::new(&args.database_url).await?;

    let user_id = match database.get_user_by_email(&args.email).await? {
        Some(user) => {
            info!(user.id = %user.id, "Demo user already exists");
            user.id
        }
        None => {
            let password_hash = bcrypt::hash("demo-password", bcrypt::DEFAULT_COST)?;
            let user = User::new(args.email.clone(), password_hash, Some("Demo Athlete".into()));
            let user_id = database.create_user(&user).await?;
            info!(user.id = %user_id, email = %args.email, "Created demo user");
            user_id
        }
    };

    database.ensure_profile(user_id).await?;

    let workouts: Vec<Workout> = starter_week()
        .into_iter()
        .map(|(day, sections)| Workout::new(user_id, day, sections))
        .collect();

    database.upsert_week(&workouts).await?;

    info!(count = workouts.len(), "Seeded starter week");
    println!("Seeded {} workouts for {}", workouts.len(), args.email);

    Ok(())
}
