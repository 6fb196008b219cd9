//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control is not done
//! here: `App` wraps protected pages in `Protected`.

pub mod not_found;
pub mod reset_password;
pub mod screen;
pub mod signin;
