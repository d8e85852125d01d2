// Communication module - Device link abstraction and response handling
pub mod classifier;
pub mod link;

pub use classifier::{classify, ClassifiedResult};
pub use link::DeviceLink;
