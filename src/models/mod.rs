mod checkout_session;
mod guest;
mod payment_link;

pub use checkout_session::*;
pub use guest::*;
pub use payment_link::*;
