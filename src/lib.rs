/* src/lib.rs */

//! An HTTP handler that serves a directory tree.
//!
//! Files are streamed, directories are rendered as listings sorted by name,
//! and an index file found inside a directory is handed to the renderer.
//! Storage and rendering are pluggable through [`provider::FileProvider`]
//! and [`render::Renderer`].

pub mod error;
pub mod handler;
pub mod listing;
pub mod path;
pub mod provider;
pub mod render;

pub use error::Error;
pub use handler::{Body, Config, Handler};
pub use listing::{Entry, ListingContext};
