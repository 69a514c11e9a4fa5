pub mod patient;
pub mod receipt;
pub mod settings;

pub use patient::*;
pub use receipt::*;
pub use settings::*;
