//! Attendants: transports that accept inbound messages.
//!
//! Only HTTP is provided. Other transports (UDP, message queues) would be
//! further implementations of [`crate::Attendant`].

pub mod http;
