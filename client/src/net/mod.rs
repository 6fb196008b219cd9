//! Networking modules for the hosted identity service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` builds the identity service the auth provider talks to and reads the
//! session hand-off the service leaves in the URL after a redirect.

pub mod api;
