// Fork-follow helper
// Spawned children get a small dylib preloaded that stops them right after
// fork/vfork so the tracer can attach before they run away. This module
// only owns the environment injection and the build cache; the interposed
// behavior lives in fork_interpose.c.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Environment variable telling the helper to stop forked children.
pub const CHILD_STOP_ENV: &str = "STRACE_MACOS_CHILD_STOP";

const INTERPOSE_SOURCE: &str = include_str!("fork_interpose.c");

fn cache_dir() -> PathBuf {
    std::env::temp_dir().join("strace_macos_cache")
}

/// Path to the compiled helper dylib, building it if missing or stale.
pub fn dylib_path() -> Result<PathBuf> {
    let dir = cache_dir();
    fs::create_dir_all(&dir).context("creating interpose cache directory")?;

    let source = dir.join("fork_interpose.c");
    let dylib = dir.join("libfork_interpose.dylib");

    // Rewrite the source only when it changed so the mtime check below
    // keeps the cached dylib warm across runs.
    let stale = match fs::read_to_string(&source) {
        Ok(existing) => existing != INTERPOSE_SOURCE,
        Err(_) => true,
    };
    if stale {
        fs::write(&source, INTERPOSE_SOURCE).context("writing interpose source")?;
    }

    let fresh = match (fs::metadata(&dylib), fs::metadata(&source)) {
        (Ok(lib), Ok(src)) => match (lib.modified(), src.modified()) {
            (Ok(lib_time), Ok(src_time)) => lib_time >= src_time,
            _ => false,
        },
        _ => false,
    };
    if fresh {
        return Ok(dylib);
    }

    let cc = std::env::var("CC").unwrap_or_else(|_| "clang".to_string());
    let output = Command::new(&cc)
        .args(["-dynamiclib", "-arch", "arm64", "-arch", "x86_64", "-o"])
        .arg(&dylib)
        .arg(&source)
        .output()
        .with_context(|| format!("running {}", cc))?;
    if !output.status.success() {
        bail!(
            "failed to compile interpose library: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(dylib)
}

/// Environment entries that make spawned children stop after fork.
/// Only meaningful on macOS; other hosts trace without fork following.
pub fn child_stop_env() -> Result<Vec<(String, String)>> {
    if !cfg!(target_os = "macos") {
        return Ok(Vec::new());
    }
    let dylib = dylib_path()?;
    Ok(vec![
        (
            "DYLD_INSERT_LIBRARIES".to_string(),
            dylib.to_string_lossy().into_owned(),
        ),
        (CHILD_STOP_ENV.to_string(), "1".to_string()),
    ])
}
