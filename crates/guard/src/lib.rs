#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Path safety for the folder quarantine
//!
//! Every folder handed to the mover passes through [`QuarantineGuard`]
//! before anything is renamed. The guard works on canonical paths and
//! compares them component by component, so `uploads2/5` is never mistaken
//! for a child of `uploads`.

pub mod containment;
pub mod deny;
pub mod writable;

pub use containment::{canonical, resolve_lenient, Placement, QuarantineGuard};
pub use deny::{hook_for, AccessDenyHook, HtaccessDeny, NoDeny, HTACCESS_DENY_ALL, HTACCESS_FILE};
pub use writable::ensure_dir_writable;
