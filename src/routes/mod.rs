// ABOUTME: HTTP route handlers for the workout planning API
// ABOUTME: Health, auth, workouts, and speech route groups assembled by the server

//! # HTTP Routes
//!
//! Each route group is a unit struct with a `routes(...)` constructor
//! returning an axum `Router`. Handlers stay thin; business logic lives in
//! the orchestrators and the database layer.

pub mod auth;
pub mod health;
pub mod speech;
pub mod workouts;

pub use auth::{AuthRoutes, AuthService};
pub use health::HealthRoutes;
pub use speech::SpeechRoutes;
pub use workouts::WorkoutRoutes;
