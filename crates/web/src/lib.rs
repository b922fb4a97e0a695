#![forbid(unsafe_code)]

//! Server-rendered HTML front end: `axum` routes over `services`, pages
//! rendered with `dioxus-ssr`.

pub mod error;
pub mod routes;
pub mod state;
pub mod views;
pub mod vm;

pub use error::WebError;
pub use routes::router;
pub use state::AppState;
