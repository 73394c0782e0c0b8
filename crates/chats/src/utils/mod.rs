pub mod validation;

pub use validation::validate_message_content;
