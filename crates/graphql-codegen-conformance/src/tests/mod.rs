mod backend_invoker_tests;
#[cfg(unix)]
mod command_backend_tests;
mod utils;
