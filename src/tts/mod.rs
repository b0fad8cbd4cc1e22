// ABOUTME: Text-to-speech synthesis via the ElevenLabs API
// ABOUTME: Speech-text formatting plus the HTTP client returning base64 audio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Text-to-Speech
//!
//! Workout text is written for reading, not listening: slashes mean
//! alternatives, dashes mean ranges, newlines separate movements. [`speech`]
//! rewrites it into speakable sentences and [`ElevenLabsClient`] synthesizes
//! MPEG audio, returned to clients as base64.

/// ElevenLabs HTTP client
pub mod elevenlabs;

/// Workout-to-speech text formatting
pub mod speech;

pub use elevenlabs::ElevenLabsClient;
pub use speech::format_workout_speech;
