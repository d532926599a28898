pub mod match_state;
pub mod request;
pub mod round;
