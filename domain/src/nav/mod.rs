//! Navigation domain.
//!
//! - [`sidebar::Sidebar`]: static sidebar entries with active-path matching

pub mod sidebar;
