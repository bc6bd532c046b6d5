//! Client and demo web UI for the Virtual Try-On Diffusion API.
//!
//! [`TryOnClient`] sends one multipart request per call to
//! `{base_url}/try-on-file` and hands back a [`TryOnResponse`] record. With
//! the `server` feature, [`ui`] serves a small page that drives the client.

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

#[cfg(feature = "server")]
pub mod ui;

pub use client::{Auth, TryOnClient};
pub use config::{ClientConfig, DemoConfig};
pub use error::{DecodeError, Result, TryOnError};
pub use models::{AvatarSex, ResponseOutcome, TryOnRequest, TryOnResponse};
