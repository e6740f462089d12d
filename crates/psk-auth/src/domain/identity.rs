//! # Identity Resolver
//!
//! Projects the selected [`IdentitySource`] onto a caller id string of the
//! form `"<kind>=<value>"`. Downstream authorization plugins match on it.

use crate::domain::errors::{ConfigError, SecurityError};
use crate::ports::outbound::OsIdentity;
use shared_types::IdentitySource;
use tracing::debug;

/// Resolves the caller id for `source`.
///
/// | Source | Result |
/// |--------|--------|
/// | `Uid` | `uid=<process uid>` |
/// | `Gid` | `gid=<process gid>` |
/// | `Group` | `group=<name of process gid>` |
/// | `User` | `user=<login name>` |
/// | `Identity` | `identity=<node identity>` |
///
/// # Errors
///
/// - `ConfigError::MissingIdentity` for `Identity` without a configured value.
/// - `SecurityError::IdentityResolution` if an OS lookup fails.
pub fn resolve_caller_id(
    source: IdentitySource,
    os: &dyn OsIdentity,
    node_identity: Option<&str>,
) -> Result<String, SecurityError> {
    let value = match source {
        IdentitySource::Uid => os.uid().to_string(),
        IdentitySource::Gid => os.gid().to_string(),
        IdentitySource::Group => os.group_name(os.gid())?,
        IdentitySource::User => os.login_name()?,
        IdentitySource::Identity => match node_identity {
            Some(identity) if !identity.is_empty() => identity.to_string(),
            _ => return Err(ConfigError::MissingIdentity.into()),
        },
    };

    let caller_id = format!("{}={}", source.kind(), value);
    debug!(%caller_id, callertype = %source, "Setting callerid");
    Ok(caller_id)
}
