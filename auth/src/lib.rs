//! # auth
//!
//! Client-side authentication state and route authorization for the
//! storefront and admin dashboards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosted identity service owns sessions, passwords and OAuth. This crate
//! owns the decisions made on top of it: who is using the application right
//! now (`provider`), which screens they may reach (`guard`, `routes`), and the
//! sign-in / password-reset flows that feed new identities into the provider.
//!
//! The crate is platform-neutral. The browser client supplies a
//! `localStorage` store, the CLI supplies a file store, and both talk to the
//! hosted service through [`hosted::HostedIdentityClient`].

pub mod classify;
pub mod config;
pub mod guard;
pub mod hosted;
pub mod identity;
pub mod provider;
pub mod remote;
pub mod reset;
pub mod routes;
pub mod signin;
pub mod store;

pub use classify::{AllowList, Classification, PrivilegePolicy, classify};
pub use guard::{ADMIN_REDIRECT, Access, DEFAULT_REDIRECT, GuardDecision, Navigation, guard};
pub use identity::SessionIdentity;
pub use provider::{AuthProvider, AuthState, LoadStatus};
pub use remote::{IdentityService, OAuthOptions, OAuthOutcome, OAuthProvider, RemoteError, UserUpdate};
pub use routes::{RouteOutcome, Screen, route};
pub use hosted::HostedIdentityClient;
pub use store::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore, SessionCache, StoreError};
