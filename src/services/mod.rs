//! Stateless engines: sanitization, embed resolution and both renderers.

pub mod embed_resolver;
pub mod form_renderer;
pub mod sanitizer;
pub mod tab_publisher;
