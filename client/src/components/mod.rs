//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared page chrome and read the session from the
//! `AuthContext` provided by `App`.

pub mod loader;
pub mod session_bar;
