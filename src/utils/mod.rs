pub mod code_generator;
pub mod user_agent;

pub use code_generator::generate_six_digit_code;
