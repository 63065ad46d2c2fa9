// LLDB-backed debugger session (macOS only, `lldb-backend` feature)
// Thin adapter from the LLDB SB API onto the DebugSession traits.

use std::path::Path;

use lldb::{SBAttachInfo, SBDebugger, SBError, SBLaunchInfo, SBProcess, SBTarget, StateType};

use super::{DebugError, DebugSession, Memory, ProcessState, StopFrame};
use crate::core::error::TraceError;

pub struct LldbSession {
    target: SBTarget,
    process: Option<SBProcess>,
}

impl LldbSession {
    /// Create a session with a target for `executable` (spawn mode) or an
    /// empty target (attach mode).
    pub fn create(executable: Option<&Path>) -> Result<Self, TraceError> {
        SBDebugger::initialize();
        let debugger = SBDebugger::create(false);
        debugger.set_asynchronous(false);

        let name = executable.map(|p| p.to_string_lossy().into_owned());
        let target = match &name {
            Some(path) => debugger.create_target_simple(path),
            None => debugger.create_target_simple(""),
        }
        .ok_or_else(|| TraceError::TargetCreation(name.unwrap_or_default()))?;

        Ok(Self {
            target,
            process: None,
        })
    }

    fn process(&self) -> Option<&SBProcess> {
        self.process.as_ref()
    }
}

impl Memory for LldbSession {
    fn read_memory(&self, address: u64, len: usize) -> Result<Vec<u8>, DebugError> {
        let process = self
            .process()
            .ok_or(DebugError::MemoryRead { address, len })?;
        let mut buf = vec![0u8; len];
        let error = SBError::default();
        let read = process.read_memory(address, &mut buf, &error);
        if error.is_failure() || read < len {
            return Err(DebugError::MemoryRead { address, len });
        }
        Ok(buf)
    }
}

impl DebugSession for LldbSession {
    fn triple(&self) -> String {
        self.target.triple().to_owned()
    }

    fn pid(&self) -> i32 {
        self.process().map(|p| p.process_id() as i32).unwrap_or(-1)
    }

    fn launch(
        &mut self,
        args: &[String],
        env: &[(String, String)],
        cwd: &Path,
    ) -> Result<(), DebugError> {
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let env_strings: Vec<String> =
            env.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let env_refs: Vec<&str> = env_strings.iter().map(String::as_str).collect();

        let launch_info = SBLaunchInfo::new();
        launch_info.set_arguments(&arg_refs, false);
        launch_info.set_environment_entries(&env_refs, true);
        launch_info.set_working_directory(&cwd.to_string_lossy());

        let process = self
            .target
            .launch(launch_info)
            .map_err(|e| DebugError::Backend(e.to_string()))?;
        self.process = Some(process);
        Ok(())
    }

    fn attach(&mut self, pid: i32) -> Result<(), DebugError> {
        let attach_info = SBAttachInfo::new_with_pid(pid as u64);
        let process = self
            .target
            .attach(attach_info)
            .map_err(|e| DebugError::Backend(e.to_string()))?;
        self.process = Some(process);
        Ok(())
    }

    fn breakpoint_by_name(&mut self, symbol: &str) -> Result<(), DebugError> {
        let bp = self.target.breakpoint_create_by_name(symbol, None);
        if !bp.is_valid() {
            return Err(DebugError::Breakpoint(symbol.to_owned()));
        }
        Ok(())
    }

    fn oneshot_breakpoint(&mut self, address: u64) -> Result<(), DebugError> {
        let bp = self.target.breakpoint_create_by_address(address);
        if !bp.is_valid() {
            return Err(DebugError::Breakpoint(format!("0x{:x}", address)));
        }
        bp.set_oneshot(true);
        Ok(())
    }

    fn state(&mut self) -> ProcessState {
        let Some(process) = self.process() else {
            return ProcessState::Unloaded;
        };
        match process.state() {
            StateType::Exited => ProcessState::Exited,
            StateType::Stopped => ProcessState::Stopped,
            StateType::Crashed => ProcessState::Crashed,
            StateType::Detached => ProcessState::Detached,
            StateType::Unloaded => ProcessState::Unloaded,
            _ => ProcessState::Running,
        }
    }

    fn exit_status(&self) -> i32 {
        self.process().map(|p| p.exit_status()).unwrap_or(1)
    }

    fn resume(&mut self) -> Result<(), DebugError> {
        let process = self
            .process()
            .ok_or_else(|| DebugError::Backend("no process".into()))?;
        process
            .continue_execution()
            .map_err(|e| DebugError::Backend(e.to_string()))
    }

    fn detach(&mut self) -> Result<(), DebugError> {
        let process = self
            .process()
            .ok_or_else(|| DebugError::Backend("no process".into()))?;
        process
            .detach()
            .map_err(|e| DebugError::Backend(e.to_string()))
    }

    fn stop_frame(&self) -> Option<StopFrame> {
        let process = self.process()?;
        let thread = process.selected_thread();
        let frame = thread.selected_frame();
        Some(StopFrame {
            thread_id: thread.thread_id(),
            pc: frame.pc(),
            function: frame.function_name().map(str::to_owned),
        })
    }

    fn read_register(&self, name: &str) -> Option<u64> {
        let process = self.process()?;
        let frame = process.selected_thread().selected_frame();
        let registers = frame.registers();
        for group in registers.iter() {
            for reg in group.children() {
                if reg.name() == Some(name) {
                    return reg.value_as_unsigned(0).into();
                }
            }
        }
        None
    }

    fn memory(&self) -> &dyn Memory {
        self
    }
}
