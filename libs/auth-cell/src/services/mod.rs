pub mod password;
pub mod users;

pub use password::PasswordService;
pub use users::UserService;
