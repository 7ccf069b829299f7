//! HTTP routing layer for Spasibka.
//!
//! Handlers are thin: they extract the caller and the request, call the
//! [`spasibka_engine::Engine`], and wrap the result in [`response::DataResponse`].

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
