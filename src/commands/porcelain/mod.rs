//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `table`: Import or drop tables in the working root
//! - `add`: Stage tables for commit
//! - `commit`: Create a new commit
//! - `status`: Show branch, upstream and table status
//! - `log`: Show commit history
//! - `branch`: Create or list branches, configure upstreams
//! - `remote`: Register remotes

pub mod add;
pub mod branch;
pub mod commit;
pub mod init;
pub mod log;
pub mod remote;
pub mod status;
pub mod table;
