pub mod analysis;
pub mod checker;
pub mod fuzz;
pub mod models;
pub mod reporting;
pub mod requester;

// Re-export commonly used items
pub use analysis::*;
pub use checker::*;
pub use fuzz::*;
pub use models::*;
pub use reporting::*;
pub use requester::*;
