//! Authentication plugin negotiation (spec §4.1 / §4.3.1).

use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPlugin {
    MySqlNativePassword,
    CachingSha2Password,
    /// Pre-4.1 hashing. Never offered by this driver, but a server
    /// downgrading an `AuthSwitchRequest` to it is recognized rather
    /// than treated as an unknown plugin.
    OldPassword,
}

impl AuthPlugin {
    pub fn name(self) -> &'static str {
        match self {
            AuthPlugin::MySqlNativePassword => "mysql_native_password",
            AuthPlugin::CachingSha2Password => "caching_sha2_password",
            AuthPlugin::OldPassword => "mysql_old_password",
        }
    }

    /// Expected scramble length in an `AuthSwitchRequest`'s plugin data,
    /// used to sanity-check the server's response before scrambling.
    pub fn auth_switch_request_data_length(self) -> usize {
        match self {
            AuthPlugin::MySqlNativePassword | AuthPlugin::CachingSha2Password => 21, // 20 bytes + NUL
            AuthPlugin::OldPassword => 9,
        }
    }
}

impl FromStr for AuthPlugin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "mysql_native_password" => Ok(AuthPlugin::MySqlNativePassword),
            "caching_sha2_password" => Ok(AuthPlugin::CachingSha2Password),
            "mysql_old_password" => Ok(AuthPlugin::OldPassword),
            other => Err(Error::protocol(format!(
                "unsupported authentication plugin: {other}"
            ))),
        }
    }
}
