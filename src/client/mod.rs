//! Client facade and authorized request dispatch.
//!
//! [`PaxfulApi`] is the main entry point; it composes configuration,
//! credential storage and the refresh-on-401 dispatcher.

mod api;
mod dispatch;
mod payload;

pub use api::{AuthorizationRedirect, PaxfulApi};
pub use payload::Payload;
