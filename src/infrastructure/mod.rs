pub mod captcha;
pub mod delivery;
pub mod limiter;
pub mod utils;
