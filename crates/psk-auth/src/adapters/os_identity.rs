//! # System Identity
//!
//! [`OsIdentity`] backed by the real process credentials and the system
//! user/group databases.

use crate::domain::errors::IdentityError;
use crate::ports::outbound::OsIdentity;
use nix::unistd::{getgid, getuid, Gid, Group, User};

/// Live process identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl OsIdentity for SystemIdentity {
    fn uid(&self) -> u32 {
        getuid().as_raw()
    }

    fn gid(&self) -> u32 {
        getgid().as_raw()
    }

    fn group_name(&self, gid: u32) -> Result<String, IdentityError> {
        match Group::from_gid(Gid::from_raw(gid)) {
            Ok(Some(group)) => Ok(group.name),
            Ok(None) => Err(IdentityError::UnknownGroup { gid }),
            Err(errno) => Err(IdentityError::LookupFailed(errno.to_string())),
        }
    }

    /// Name of the passwd entry for the real uid.
    fn login_name(&self) -> Result<String, IdentityError> {
        let uid = getuid();
        match User::from_uid(uid) {
            Ok(Some(user)) => Ok(user.name),
            Ok(None) => Err(IdentityError::UnknownUser { uid: uid.as_raw() }),
            Err(errno) => Err(IdentityError::LookupFailed(errno.to_string())),
        }
    }
}
