//! UI layer for the desktop catalog: a single window rendering controller state.

pub mod app;

pub use app::CatalogApp;
