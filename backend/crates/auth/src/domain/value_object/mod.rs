//! Value Object Module

pub mod email;
pub mod identity_id;
pub mod identity_name;
pub mod password;
