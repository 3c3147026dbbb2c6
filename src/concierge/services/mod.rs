//! Services for the stub concierge.

mod stub;

pub use stub::ConciergeStub;
