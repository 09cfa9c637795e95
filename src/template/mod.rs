//! Template lookup for component kinds
//!
//! Every component kind maps to one template file. The table is built once
//! at startup, either by hand or from a [`Manifest`], and validated eagerly
//! so a missing file fails before the first request.
//!
//! # Example
//!
//! ```text
//! templates/
//!   ui/
//!     button.html        <- Button, registered with dir "ui"
//!     button.js          <- inlined after the rendered button
//!     icon_button.html   <- IconButton
//!     icon-button.js
//! ```

mod manifest;
mod resolver;

pub use manifest::{Manifest, ManifestError};
pub use resolver::{convention_path, snake_case, TemplateEntry, TemplateError, TemplateResolver};
