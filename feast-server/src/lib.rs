//! Feast Server - food-ordering marketplace backend
//!
//! Restaurants register, publish menus and work through incoming orders;
//! customers browse and order.
//!
//! # Modules
//!
//! ```text
//! feast-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # credentials, JWT, middleware, ownership
//! ├── db/            # SQLite pool and repositories
//! ├── services/      # menu and restaurant profile rules
//! ├── orders/        # order engine, status policy, money
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging and validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

pub use auth::{CurrentPrincipal, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::init_logger_with_file;

/// Security event on the `security` tracing target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ______                __
   / ____/__  ____ ______/ /_
  / /_  / _ \/ __ `/ ___/ __/
 / __/ /  __/ /_/ (__  ) /_
/_/    \___/\__,_/____/\__/
    "#
    );
}
