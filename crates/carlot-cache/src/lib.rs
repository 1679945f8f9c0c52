//! # Carlot Cache
//!
//! ETag-based conditional GET for the Carlot API.
//!
//! Responses are fingerprinted after the handler runs. Nothing is stored
//! server side: the validator is recomputed from the bytes of every
//! response, and a client repeating it in `If-None-Match` gets a bodyless
//! `304 Not Modified`.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use carlot_cache::conditional_get;
//!
//! let app = Router::new()
//!     .route("/api/v1/cars", get(list_cars))
//!     .layer(middleware::from_fn(conditional_get));
//! ```

pub mod middleware;

pub use middleware::{BufferedResponse, Decision, EtagError, conditional_get, decide, generate_etag};
