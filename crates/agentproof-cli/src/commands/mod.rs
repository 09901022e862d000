//! Command implementations.

pub mod fetch;
pub mod keygen;
pub mod outcome;
pub mod resolve;
pub mod validate;
pub mod verify;

pub use self::fetch::execute_fetch;
pub use self::keygen::execute_keygen;
pub use self::outcome::execute_outcome;
pub use self::resolve::execute_resolve;
pub use self::validate::execute_validate;
pub use self::verify::execute_verify;
