// Renderers consume validated `Resume` data only, except `partial`, which
// draws placeholders over a raw payload for the live preview.
// PDF rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod html;
pub mod metrics;
pub mod partial;
pub mod pdf;
pub mod winansi;

pub use metrics::{default_page_config, PageConfig};
