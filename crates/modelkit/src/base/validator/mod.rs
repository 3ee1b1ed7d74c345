mod email;

pub use email::is_valid_email_syntax;
