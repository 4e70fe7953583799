//! Self-validating value objects

mod cpf;
mod email;

pub use cpf::Cpf;
pub use email::{Email, EMAIL_MAX_LEN};
