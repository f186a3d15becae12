pub mod alarms;
pub mod reference;
pub mod session;
pub mod treatment;
