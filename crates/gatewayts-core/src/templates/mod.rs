//! Template rendering for generated TypeScript modules.
//!
//! Templates are embedded in the crate and rendered with Tera. The functions
//! they call (`ts_type`, `render_url`, `build_init_req`, `field_name`,
//! `partial`) are bound per [`Renderer`], so independent runs never share
//! state.

mod functions;
mod renderer;
mod types;

pub use renderer::Renderer;
pub use types::{FileView, MessageView};
