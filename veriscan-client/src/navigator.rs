//! Navigation seam between the orchestration layer and the host shell.
//!
//! The core never renders routes; it only asks the shell to move the user
//! somewhere. Forced logout lands on [`Surface::Login`], the entitlement
//! gate points its call-to-action at [`Surface::Pricing`].

use async_trait::async_trait;
use log::debug;

/// Destination a workflow can request from the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Login page, the landing spot for unauthenticated callers
    Login,
    /// Pricing/upgrade page, the entitlement call-to-action target
    Pricing,
}

/// Host-shell navigation sink.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Move the user to the given surface.
    async fn navigate(&self, surface: Surface);
}

/// Navigator that drops every request.
///
/// Used when the client runs headless (scripts, tests without navigation
/// assertions) and there is nowhere to send the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNavigator;

#[async_trait]
impl Navigator for NullNavigator {
    async fn navigate(&self, surface: Surface) {
        debug!("[Navigator] dropping navigation request to {surface:?}");
    }
}
