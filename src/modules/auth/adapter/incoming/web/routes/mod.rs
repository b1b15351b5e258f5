mod fetch_current_user;
mod login_user;
mod logout_user;
mod refresh_token;
mod register_user;
mod session_response;

pub use fetch_current_user::*;
pub use login_user::*;
pub use logout_user::*;
pub use refresh_token::*;
pub use register_user::*;
pub use session_response::{AuthSessionResponse, UserResponse};
