mod credential;
mod guard;
mod policy;

pub use credential::Credential;
pub use guard::{CredentialGuard, CredentialGuardResult};
pub use policy::{DEFAULT_CLOCK_SKEW, ExpiryPolicy};
