pub mod chat;
pub mod chirp;
pub mod notification;
pub mod saved;
pub mod user;

pub use chat::*;
pub use chirp::*;
pub use notification::*;
pub use saved::*;
pub use user::*;
