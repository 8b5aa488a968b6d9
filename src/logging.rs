// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Console logging on stderr so stdout only carries report output, plus an
/// optional plain log file. `RUST_LOG` wins over the verbosity flag.
///
/// Keep the returned guard alive until exit so buffered file lines are flushed.
pub fn init_logging(verbose: bool, file: Option<&Path>) -> Option<WorkerGuard> {
    let default = if verbose {
        "salesclip=debug"
    } else {
        "salesclip=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let appender = file.and_then(|path| {
        let name = path.file_name()?;
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let _ = fs::create_dir_all(dir);
        Some(tracing_appender::rolling::never(dir, name))
    });
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    guard
}
