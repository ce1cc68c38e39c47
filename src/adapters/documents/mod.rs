//! Document loader adapters.

pub mod text;

pub use text::TextDocumentLoader;
