//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser glue (storage, timers, navigation) lives here so pages only deal
//! with signals and the `auth` core.

pub mod auth;
pub mod notice;
pub mod storage;
