//! The text buffer.
//!
//! A [`LineStore`] owns the ordered [`Line`]s of the file, keeps each line's
//! tab-expanded render form and highlight tags in sync with its raw bytes,
//! and counts unsaved mutations.

mod buffer;
mod row;

pub use buffer::{DEFAULT_TAB_STOP, LineStore};
pub use row::{Line, expand, raw_to_render_index, render_to_raw_index};
