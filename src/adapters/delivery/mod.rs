//! Delivery of produced exports
//!
//! - [`DownloadSink`] receives finished files; [`DirectorySink`] writes them
//!   into an output directory
//! - [`PrintSurface`] shows the print view; [`SystemViewer`] hands it to the
//!   platform's default viewer

pub mod directory;
pub mod traits;
pub mod viewer;

pub use directory::DirectorySink;
pub use traits::{DownloadSink, PrintSurface, SurfaceStatus};
pub use viewer::SystemViewer;
