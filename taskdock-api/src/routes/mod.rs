/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Welcome and health check endpoints
/// - `auth`: Authentication endpoints (register, login, protected)
/// - `tasks`: Task CRUD endpoints with ownership enforcement

pub mod auth;
pub mod health;
pub mod tasks;
