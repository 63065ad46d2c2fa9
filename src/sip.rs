// SIP (System Integrity Protection) detection
// Platform binaries cannot be debugged while SIP restricts debugging; the
// tracer refuses them up front with a usable message.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Resolve a command name to an absolute binary path: absolute as-is, then
/// `$PATH`, then relative to the working directory.
pub fn resolve_binary_path(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.is_absolute() {
        return path.canonicalize().ok();
    }

    if !program.contains('/') {
        if let Some(paths) = std::env::var_os("PATH") {
            for dir in std::env::split_paths(&paths) {
                let candidate = dir.join(program);
                if candidate.is_file() {
                    return candidate.canonicalize().ok();
                }
            }
        }
    }

    if path.exists() {
        return path.canonicalize().ok();
    }
    None
}

/// Whether SIP debugging restrictions are active on this host. When
/// `csrutil` cannot be consulted, assume they are.
pub fn is_sip_enabled() -> bool {
    let Ok(output) = Command::new("csrutil").arg("status").output() else {
        return true;
    };
    let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
    if stdout.contains("debugging restrictions: enabled") {
        return true;
    }
    stdout.contains("status: enabled")
}

/// Whether `binary` is an Apple platform binary protected by SIP. Detection
/// goes through the code signature, not path heuristics: platform binaries
/// carry a "Platform identifier" in their signing information.
pub fn is_sip_protected(binary: &Path) -> bool {
    if !is_sip_enabled() {
        return false;
    }

    // codesign prints signing details on stderr
    let Ok(output) = Command::new("codesign").arg("-dvvv").arg(binary).output() else {
        return false;
    };
    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    stderr.contains("platform identifier=")
}

/// Refusal message pointing at traceable alternatives.
pub fn sip_error_message(path: &Path) -> String {
    format!(
        "Cannot trace '{}': binary is protected by System Integrity Protection (SIP).\n\
         SIP prevents debugging system binaries in /bin, /sbin, /usr/bin, /System, etc.\n\n\
         Alternatives:\n\
         \x20 - Use binaries from Homebrew: /usr/local/bin/* or /opt/homebrew/bin/*\n\
         \x20 - Use binaries from Nix: /nix/store/*\n\
         \x20 - Compile your own binary and place it in /tmp or ~/\n\
         \x20 - Disable SIP (not recommended): csrutil disable (requires reboot)",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_absolute_paths() {
        // Guaranteed to exist in the test environment
        let exe = std::env::current_exe().expect("test binary path");
        let resolved = resolve_binary_path(&exe.to_string_lossy());
        assert_eq!(resolved, exe.canonicalize().ok());
    }

    #[test]
    fn missing_binary_is_none() {
        assert_eq!(resolve_binary_path("/no/such/binary/anywhere"), None);
        assert_eq!(resolve_binary_path("definitely-not-a-command-p7q9"), None);
    }

    #[test]
    fn error_message_names_the_binary() {
        let msg = sip_error_message(Path::new("/bin/ls"));
        assert!(msg.contains("/bin/ls"));
        assert!(msg.contains("System Integrity Protection"));
        assert!(msg.contains("Homebrew"));
    }
}
