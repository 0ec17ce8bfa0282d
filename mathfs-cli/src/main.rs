//! mathfs CLI - mount the arithmetic filesystem.
//!
//! Usage:
//!   mathfs <mountpoint> [options]
//!
//! Examples:
//!   mathfs /tmp/math                 # a = b = 1
//!   mathfs /tmp/math -a 5 -b 3       # start from a = 5, b = 3
//!   mathfs /tmp/math --auto-unmount  # unmount if the process dies
//!
//! Then:
//!   echo 12 > /tmp/math/a.txt
//!   cat /tmp/math/mul.txt

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mathfs_core::{spawn_mount, MathFs, MountConfig, NumericModel};

/// Arithmetic virtual filesystem
#[derive(Parser, Debug)]
#[command(name = "mathfs")]
#[command(about = "Mount a directory where sum.txt and mul.txt follow a.txt and b.txt")]
struct Args {
    /// Directory to mount at
    mountpoint: PathBuf,

    /// Initial value of a.txt
    #[arg(short = 'a', long = "a", default_value_t = 1, allow_negative_numbers = true)]
    a: i64,

    /// Initial value of b.txt
    #[arg(short = 'b', long = "b", default_value_t = 1, allow_negative_numbers = true)]
    b: i64,

    /// Allow other users to access the mount
    #[arg(long)]
    allow_other: bool,

    /// Unmount automatically when the process exits
    #[arg(long)]
    auto_unmount: bool,

    /// Let the kernel cache file pages
    #[arg(long)]
    no_direct_io: bool,

    /// Log every filesystem operation
    #[arg(short, long)]
    trace: bool,
}

impl Args {
    fn mount_config(&self) -> MountConfig {
        MountConfig {
            allow_other: self.allow_other,
            auto_unmount: self.auto_unmount,
            direct_io: !self.no_direct_io,
            ..MountConfig::default()
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,mathfs_core=trace,mathfs=trace"
    } else {
        "info"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.trace);

    let model = Arc::new(NumericModel::with_values(args.a, args.b));
    let fs = MathFs::new(model);
    let config = args.mount_config();

    let session = spawn_mount(fs, &args.mountpoint, &config)
        .with_context(|| format!("failed to mount at {}", args.mountpoint.display()))?;
    info!(
        mountpoint = %args.mountpoint.display(),
        a = args.a,
        b = args.b,
        direct_io = config.direct_io,
        "mathfs mounted, press Ctrl-C to unmount"
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    info!("unmounting");
    drop(session);
    Ok(())
}
