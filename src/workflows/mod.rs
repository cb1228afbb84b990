pub mod expiry;
pub mod roster;
