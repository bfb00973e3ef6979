pub mod alert;
pub mod report;
pub mod request_params;
pub mod sample;
pub mod snapshot;
pub mod summary;
