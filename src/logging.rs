use cfg_if::cfg_if;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

fn env_filter() -> EnvFilter {
    // wgpu is chatty at info
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn"))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Route tracing output to the browser console.
        pub fn init() {
            let console = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

            let _ = tracing_subscriber::registry()
                .with(env_filter())
                .with(console)
                .try_init();

            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();
        }
    } else {
        use once_cell::sync::OnceCell;
        use std::path::{Path, PathBuf};
        use tracing_appender::non_blocking::WorkerGuard;
        use tracing_subscriber::fmt;

        const DEFAULT_LOG_FILE: &str = "logs/glidenav.log";

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Split `RUST_LOG_FILE` into the rolling appender's directory and file prefix.
        fn log_file_parts(path: &str) -> (PathBuf, PathBuf) {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path.file_name().map(Path::new).unwrap_or(Path::new("glidenav.log"));
            (dir.to_path_buf(), name.to_path_buf())
        }

        /// stderr plus a daily rolling file, filtered by `RUST_LOG`.
        pub fn init() {
            let log_path = std::env::var("RUST_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
            let (dir, name) = log_file_parts(&log_path);
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            let _ = FILE_GUARD.set(guard);

            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .compact();

            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact();

            let _ = tracing_subscriber::registry()
                .with(env_filter())
                .with(stderr_layer)
                .with(file_layer)
                .try_init();

            std::panic::set_hook(Box::new(|info| {
                let location = info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                    .unwrap_or_else(|| "<unknown>".to_string());
                let payload = info
                    .payload()
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| info.payload().downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "<non-string panic>".to_string());
                let bt = std::backtrace::Backtrace::force_capture();
                tracing::error!("panic at {location}: {payload}\nBacktrace:\n{bt:?}");
            }));
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn log_file_path_splits_into_dir_and_name() {
                let (dir, name) = log_file_parts("logs/glidenav.log");
                assert_eq!(dir, PathBuf::from("logs"));
                assert_eq!(name, PathBuf::from("glidenav.log"));

                let (dir, name) = log_file_parts("viewer.log");
                assert_eq!(dir, PathBuf::from("."), "bare file names log to the working dir");
                assert_eq!(name, PathBuf::from("viewer.log"));
            }
        }
    }
}
