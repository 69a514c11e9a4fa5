pub mod enums;
pub mod filters;
pub mod patient;
pub mod receipt;
pub mod settings;

pub use enums::*;
pub use filters::*;
pub use patient::Patient;
pub use receipt::Receipt;
pub use settings::PracticeSettings;
