pub mod dashboard;
pub mod dispatch;
pub mod personnel;
pub mod profile;
pub mod returns;
