use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow `--log-level`. Everything else stays at warn.
const WIDCFG_TARGETS: [&str; 4] = ["widcfg", "widcfg_frame", "widcfg_table", "widcfg_dispatch"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: LogLevel) -> String {
    let level = level.as_directive();
    let mut directives = String::from("warn");
    for target in WIDCFG_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

/// `RUST_LOG` wins over `--log-level`; targets are shown only then.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directives(level)), false),
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(from_env);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
