//! Export module for converting laid-out documents to output formats.

mod json;
mod pdf;
mod text;

pub use json::{from_json, to_json, JsonFormat};
pub use pdf::{save_pdf, to_pdf, write_pdf, PdfOptions};
pub use text::{to_text, PAGE_SEPARATOR};
