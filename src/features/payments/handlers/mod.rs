mod payment_handler;

pub use payment_handler::*;
