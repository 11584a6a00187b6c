//! Logging abstraction
//!
//! Provides logging macros that work across targets:
//! - Firmware (`rp2040` feature): defmt over RTT
//! - Host tests: println!/eprintln!
//! - Host non-test builds: arguments are type-checked, nothing is emitted
//!
//! Format strings must stay within the subset shared by defmt and core::fmt
//! (`{}` and `{:?}`).

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2040")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "rp2040"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "rp2040"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2040")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "rp2040"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "rp2040"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2040")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "rp2040"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "rp2040"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2040")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "rp2040"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "rp2040"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
