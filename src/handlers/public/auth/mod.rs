// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition. Neither endpoint requires a token.

pub mod login; // POST /login - verify credentials and issue a JWT
pub mod register; // POST /register - create a user account

pub use login::login;
pub use register::register;
