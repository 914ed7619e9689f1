//! Digest rendering.
//!
//! - [`html`]: Renders the sorted, deduplicated record list into the HTML
//!   document that becomes the email body

pub mod html;
