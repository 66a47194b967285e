pub mod validation;
pub mod view;
pub mod page;

pub use validation::FormValidator;
pub use view::{BookingView, BookingViewUpdate, RecordingBookingView};
pub use page::{BookingPage, BookingSession};
