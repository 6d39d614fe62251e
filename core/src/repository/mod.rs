pub mod csv_loader;
pub mod output;

// Re-export
pub use csv_loader::{load_matches, parse_matches};
pub use output::{write_atomic, ChartRenderer, JsonSummaryWriter, SummaryWriter};
