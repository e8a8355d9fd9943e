//! Message-bus contract for inter-stage signaling.
//!
//! Processing stages signal each other over a message bus. Only the
//! contract lives here; no implementation ships with this crate, and the
//! transport behind the bus is out of scope.

/// Contract implemented by processing stages that consume from and send to
/// a message bus.
///
/// `Bus` is the underlying bus handle type; `Address` is the addressing
/// scheme used for communication between stages.
pub trait EventBusManager: Send + Sync {
    type Bus;
    type Address;
    type Message;

    /// Obtain the bus handle this stage communicates over.
    fn event_bus(&self) -> Self::Bus;

    /// Consume messages arriving at `from`, process each, and send the
    /// result on to `to`.
    fn consume_and_send(&self, bus: &Self::Bus, from: &Self::Address, to: &Self::Address);

    /// Process one message. Stages implement their business logic here.
    fn process(&self, message: Self::Message) -> Self::Message;
}
