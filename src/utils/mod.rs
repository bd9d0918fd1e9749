pub mod shutdown;

pub use shutdown::setup_shutdown_handler;
