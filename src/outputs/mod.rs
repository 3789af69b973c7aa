//! Output writers for the digest run.
//!
//! # Submodules
//!
//! - [`json`]: writes the filtered, categorized article list for persistence
//! - [`markdown`]: writes the rendered digest
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── articles_2025-09-25.json
//! └── digest_2025-09-25.md
//! ```

pub mod json;
pub mod markdown;
