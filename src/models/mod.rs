//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod interaction;
pub mod notification;
pub mod relationship;
pub mod settings;
pub mod suggestion;

pub use interaction::*;
pub use notification::*;
pub use relationship::*;
pub use settings::*;
pub use suggestion::*;
