pub mod simulator;
pub mod render;
pub mod view;
pub mod desk;

pub use simulator::PaymentSimulator;
pub use view::PaymentView;
pub use desk::{PaymentDesk, PaymentSession, PaymentTicket};
