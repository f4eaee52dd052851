pub mod dispatch;
pub mod metrics;

pub use dispatch::{
    DispatchError, DispatchReceipt, LogDispatcher, NotificationDispatcher, RecordingDispatcher,
};
pub use metrics::{get_metrics, init_metrics};
