pub mod controls;
pub mod form;
pub mod log_view;
