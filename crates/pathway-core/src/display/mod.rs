//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation results get newtype wrappers so the same data
//! can be formatted per context. Everything renders as markdown, which the
//! CLI passes through its terminal renderer and the MCP server returns as
//! text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Roadmap, Task) │───▶│ Result Types    │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (SavedRoadmaps, Interactions)
//! - [`results`]: Operation result types (CreateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ### Status Messages
//!
//! ```rust
//! use pathway_core::display::OperationStatus;
//!
//! let success = OperationStatus::success("Moved roadmap 3 up".to_string());
//! assert!(success.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Interactions, SavedRoadmaps};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult};
pub use status::OperationStatus;
