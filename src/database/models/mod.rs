pub mod task_daily;

pub use task_daily::{TaskPhotos, TaskPhotosUpdate};
