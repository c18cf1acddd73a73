//! Caller identity
//!
//! A session carries who is running a command, from where, and the single
//! query time every timestamp default of that invocation uses. It is built
//! once by the invoking surface and passed down explicitly.

use crate::areas::config::Config;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::RepoError;
use bitflags::bitflags;
use chrono::{DateTime, FixedOffset, Local, SubsecRound};

pub const USER_ENV: &str = "ROWBIT_USER";
pub const CLIENT_ADDRESS_ENV: &str = "ROWBIT_CLIENT_ADDRESS";
const DEFAULT_USER: &str = "root";
const DEFAULT_CLIENT_ADDRESS: &str = "localhost";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u8 {
        const READ = 0b01;
        const WRITE = 0b10;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: String,
    client_address: String,
    query_time: DateTime<FixedOffset>,
    permissions: Permissions,
}

impl Session {
    pub fn new(user: String, client_address: String, query_time: DateTime<FixedOffset>) -> Self {
        Session {
            user,
            client_address,
            query_time,
            permissions: Permissions::READ | Permissions::WRITE,
        }
    }

    /// Identity from `ROWBIT_USER` (then `USER`) and `ROWBIT_CLIENT_ADDRESS`;
    /// the query time is captured here, once, truncated to whole seconds.
    pub fn from_env() -> Self {
        let user = std::env::var(USER_ENV)
            .or_else(|_| std::env::var("USER"))
            .ok()
            .filter(|user| !user.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER.to_string());
        let client_address = std::env::var(CLIENT_ADDRESS_ENV)
            .ok()
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_ADDRESS.to_string());

        // commit timestamps are stored in whole seconds
        let query_time = Local::now().fixed_offset().trunc_subsecs(0);
        Session::new(user, client_address, query_time)
    }

    pub fn with_permissions(self, permissions: Permissions) -> Self {
        Session {
            permissions,
            ..self
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn client_address(&self) -> &str {
        &self.client_address
    }

    pub fn query_time(&self) -> DateTime<FixedOffset> {
        self.query_time
    }

    /// Default commit email: `user@client_address`
    pub fn default_email(&self) -> String {
        format!("{}@{}", self.user, self.client_address)
    }

    /// Fail with `AccessDenied` unless this session may write to `branch`.
    /// A branch with a `writers` list only admits the users on it.
    pub fn check_write_access(&self, config: &Config, branch: &BranchName) -> anyhow::Result<()> {
        let allowed = self.permissions.contains(Permissions::WRITE)
            && config
                .writers(branch)
                .is_none_or(|writers| writers.iter().any(|writer| writer == &self.user));

        if allowed {
            Ok(())
        } else {
            tracing::warn!(user = %self.user, %branch, "write access denied");
            Err(RepoError::AccessDenied {
                user: self.user.clone(),
                branch: branch.to_string(),
            }
            .into())
        }
    }
}
