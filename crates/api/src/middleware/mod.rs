//! Caller identification extractors.
//!
//! - [`actor::Actor`] -- The calling employee, from the `X-Bitrix-User-Id` header.
//! - [`rbac::RequireAdmin`] -- The calling employee, who must be an administrator.

pub mod actor;
pub mod rbac;
