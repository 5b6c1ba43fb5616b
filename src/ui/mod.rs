pub mod icons;
pub mod progress;

pub use progress::{LoadingSpinner, wait_with_spinner};
