//! Branch status
//!
//! ## Components
//!
//! - `divergence`: ahead/behind counts against the remote-tracking branch
//! - `tracking`: the human-readable tracking line
//! - `status_info`: staged, unstaged and untracked tables of a branch

pub mod divergence;
pub mod status_info;
pub mod tracking;
