pub mod currency;
pub mod html;
pub mod session;
pub mod test_utils;

pub use currency::format_usd;
pub use html::escape_html;
pub use session::SessionStore;
