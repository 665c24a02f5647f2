pub mod customize;
pub mod dashboard;
