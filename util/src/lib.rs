pub mod ser;
pub mod time;
pub mod tracing_init;
