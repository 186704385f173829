//! # gridvis Core
//!
//! Core types, traits, and utilities for gridvis.
//! Provides colors, grid geometry, the Y-axis orientation preference,
//! the error hierarchy, and the render-thread dispatch primitive shared by
//! every toolkit backend.

pub mod color;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod types;

pub use color::{Color, ColorParseError, ColorStack};
pub use dispatch::{invoke_and_wait, Dispatcher, RenderThread};
pub use error::{DispatchError, Error, Result, ToolkitError};
pub use geometry::{GridLine, GridPoint, GridRect, Shape, Size};
pub use orientation::YPreference;
pub use types::{thread_safe, Job, ThreadSafe};
