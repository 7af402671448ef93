#![warn(missing_docs)]
//! Item filter rules shared across the workspace.

pub mod code;
pub mod filter;
pub mod item;
pub mod pattern;
pub mod settings;

// Re-export commonly used types
pub use code::{ItemCode, DEFAULT_NAMESPACE};
pub use filter::{evaluate, is_allowed, AllowReason, DenyReason, FoodKind, Verdict};
pub use item::{ItemDescriptor, MaterialClass};
pub use pattern::{GlobPattern, PatternList};
pub use settings::{FilterSettings, SettingsError};
