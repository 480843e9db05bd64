pub mod errors;
pub mod redirect;
pub mod server;
pub mod state;
pub mod urls;

pub use server::{build_app_router, run_api};
pub use state::AppState;
