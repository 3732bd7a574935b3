//! Query API Module
//!
//! The public face of the service: cleans incoming questions, runs them through
//! the matcher, escalates repeated misses through the abuse guard, and renders
//! the JSON the portal's chat widget expects.
//!
//! ## Endpoints
//! - `POST /api`: answer a `{"user_question": ...}` body.
//! - `GET /greet`: time-of-day greeting plus usage hint.
//! - `GET /data-request`: link to the portal's data-request form.
//!
//! ## Submodules
//! - **`handlers`**: Axum handlers and the router.
//! - **`service`**: `QueryService`, which owns the per-question flow.
//! - **`types`**: Request/response bodies and user-facing messages.

pub mod handlers;
pub mod service;
pub mod types;
