//! Static HTML rendering of a page document, for the detached preview of a
//! draft and for the read-only public page.

mod compiler;

pub use compiler::{compile_to_html, escape_html, CompileError, CompileOptions, RenderMode};
