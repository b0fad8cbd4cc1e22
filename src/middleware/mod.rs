// ABOUTME: HTTP middleware for request authentication and CORS
// ABOUTME: Bearer token validation plus cross-origin setup for browser clients

pub mod auth;
pub mod cors;

pub use auth::AuthMiddleware;
pub use cors::setup_cors;
