pub mod clustering;
pub mod projection;
pub mod scaling;
pub mod summary;

pub use clustering::annotate_clusters;
pub use projection::project;
pub use scaling::scale;
pub use summary::{clustered_only, summarize, CycleSummary};
