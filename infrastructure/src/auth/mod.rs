//! Auth adapters: in-process session store and a local identity provider.

mod local_identity;
mod session_store;

pub use local_identity::LocalIdentityProvider;
pub use session_store::WatchSessionProvider;
