// Architecture adapter
// Encapsulates the calling convention so the decoder layer never branches
// on architecture.

use crate::debug::DebugSession;

/// Architecture-specific calling convention.
pub trait Arch: Send + Sync {
    /// Register names carrying the first function arguments.
    fn arg_registers(&self) -> &'static [&'static str];

    /// Register holding the return value.
    fn return_register(&self) -> &'static str;

    /// Recover the return address of the function the target stopped in.
    fn return_address(&self, session: &dyn DebugSession) -> Option<u64>;

    /// Read variadic argument `index` (0 = first variadic argument).
    ///
    /// On macOS variadic arguments live on the stack even when argument
    /// registers are free.
    fn read_variadic(&self, session: &dyn DebugSession, index: usize) -> Option<u64>;
}

/// ARM64 (AArch64).
pub struct Arm64;

impl Arch for Arm64 {
    fn arg_registers(&self) -> &'static [&'static str] {
        &["x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7"]
    }

    fn return_register(&self) -> &'static str {
        "x0"
    }

    fn return_address(&self, session: &dyn DebugSession) -> Option<u64> {
        // Return address is in the link register; no memory read needed.
        session.read_register("lr")
    }

    fn read_variadic(&self, session: &dyn DebugSession, index: usize) -> Option<u64> {
        // Variadic slot i lives at [sp + 8*i].
        let sp = session.read_register("sp")?;
        let data = session
            .read_memory(sp + 8 * index as u64, 8)
            .ok()?;
        Some(u64::from_le_bytes(data.try_into().ok()?))
    }
}

/// x86_64 (AMD64).
pub struct X8664;

impl Arch for X8664 {
    fn arg_registers(&self) -> &'static [&'static str] {
        &["rdi", "rsi", "rdx", "rcx", "r8", "r9"]
    }

    fn return_register(&self) -> &'static str {
        "rax"
    }

    fn return_address(&self, session: &dyn DebugSession) -> Option<u64> {
        // At function entry the return address sits at [rsp].
        let sp = session.read_register("rsp")?;
        let data = session.read_memory(sp, 8).ok()?;
        Some(u64::from_le_bytes(data.try_into().ok()?))
    }

    fn read_variadic(&self, session: &dyn DebugSession, index: usize) -> Option<u64> {
        // Stack slots start past the return address: [rsp + 8*(i+1)].
        let sp = session.read_register("rsp")?;
        let data = session
            .read_memory(sp + 8 * (index as u64 + 1), 8)
            .ok()?;
        Some(u64::from_le_bytes(data.try_into().ok()?))
    }
}

/// Select the architecture adapter from the target triple's first component.
pub fn detect(triple: &str) -> Option<Box<dyn Arch>> {
    let arch = triple.split('-').next().unwrap_or("");
    match arch {
        "arm64" | "aarch64" | "arm64e" => Some(Box::new(Arm64)),
        "x86_64" | "i386" => Some(Box::new(X8664)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_arm64_variants() {
        for triple in ["arm64-apple-macosx14.0.0", "aarch64-apple-darwin", "arm64e-apple-macosx"] {
            let arch = detect(triple).expect("arm64 triple");
            assert_eq!(arch.return_register(), "x0");
            assert_eq!(arch.arg_registers().len(), 8);
        }
    }

    #[test]
    fn detects_x86_64() {
        let arch = detect("x86_64-apple-macosx14.0.0").expect("x86_64 triple");
        assert_eq!(arch.return_register(), "rax");
        assert_eq!(arch.arg_registers()[0], "rdi");
    }

    #[test]
    fn rejects_unknown() {
        assert!(detect("riscv64-unknown-linux").is_none());
        assert!(detect("").is_none());
    }
}
