//! Domain types shared by the inbox and scrutiny services.

pub mod application;
pub mod edcr;
pub mod inbox;
pub mod lenient;
pub mod scrutiny;
pub mod types;
pub mod user;
