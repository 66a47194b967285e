pub mod emailjs;
pub mod dispatcher;

pub use emailjs::{EmailJsClient, NotificationClient};
pub use dispatcher::NotificationDispatcher;
