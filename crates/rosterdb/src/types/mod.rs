//! Timestamp and ID vocabulary shared by every module.

mod id;
mod slot;
mod timestamp;

pub use id::RecordId;
pub use slot::SlotTime;
pub use timestamp::Timestamp;

pub use time::Date;
