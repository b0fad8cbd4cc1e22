// ABOUTME: Workout plan orchestration built on the LLM provider layer
// ABOUTME: Response parsing plus weekly generation and section regeneration flows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Plan Orchestration
//!
//! Turns free-text coaching requests into persisted workouts. The model's
//! output is untrusted prose that happens to contain JSON; [`parser`] digs
//! the JSON out and normalizes it, [`generator`] drives the weekly flow, and
//! [`regenerate`] handles per-workout and per-section regeneration.

/// Weekly plan generation flow
pub mod generator;

/// Model response extraction and normalization
pub mod parser;

/// Workout and section regeneration flows
pub mod regenerate;

pub use generator::WeeklyPlanGenerator;
pub use regenerate::WorkoutRegenerator;
