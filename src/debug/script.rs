// Scripted in-memory debugger session
// Replays a pre-recorded sequence of stops against a fake target memory.
// This is the backend the test-suite runs the engine against.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::Path;

use super::{DebugError, DebugSession, Memory, ProcessState, StopFrame};

/// Sparse byte-addressable fake target memory.
#[derive(Debug, Default)]
pub struct FakeMemory {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl FakeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `bytes` at `address`, replacing anything already there.
    pub fn put(&mut self, address: u64, bytes: &[u8]) {
        self.regions.insert(address, bytes.to_vec());
    }

    /// Place a NUL-terminated string at `address`, with a zeroed guard tail
    /// behind it so chunked string reads stay inside mapped memory the way
    /// they do on a real page.
    pub fn put_cstr(&mut self, address: u64, s: &str) {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        bytes.resize(bytes.len() + 256, 0);
        self.put(address, &bytes);
    }

    /// Place a little-endian u64 at `address`.
    pub fn put_u64(&mut self, address: u64, value: u64) {
        self.put(address, &value.to_le_bytes());
    }

    /// Place a little-endian i32 at `address`.
    pub fn put_i32(&mut self, address: u64, value: i32) {
        self.put(address, &value.to_le_bytes());
    }

    fn byte_at(&self, address: u64) -> Option<u8> {
        // Regions are keyed by base address; find the last region starting
        // at or before `address` and index into it.
        self.regions
            .range(..=address)
            .next_back()
            .and_then(|(base, bytes)| bytes.get((address - base) as usize).copied())
    }
}

impl Memory for FakeMemory {
    fn read_memory(&self, address: u64, len: usize) -> Result<Vec<u8>, DebugError> {
        let mut out = Vec::with_capacity(len);
        for i in 0..len as u64 {
            match self.byte_at(address + i) {
                Some(b) => out.push(b),
                None => return Err(DebugError::MemoryRead { address, len }),
            }
        }
        Ok(out)
    }
}

/// One stop in the script: the thread/frame the debugger reports and the
/// register file visible at that stop.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStop {
    pub thread_id: u64,
    pub pc: u64,
    pub function: Option<String>,
    pub registers: HashMap<String, u64>,
}

impl ScriptedStop {
    pub fn new(thread_id: u64, pc: u64, function: Option<&str>) -> Self {
        Self {
            thread_id,
            pc,
            function: function.map(str::to_owned),
            registers: HashMap::new(),
        }
    }

    pub fn with_register(mut self, name: &str, value: u64) -> Self {
        self.registers.insert(name.to_owned(), value);
        self
    }
}

/// Scripted implementation of [`DebugSession`].
pub struct ScriptedSession {
    pub memory: FakeMemory,
    triple: String,
    pid: i32,
    exit_status: i32,
    stops: VecDeque<ScriptedStop>,
    current: Option<ScriptedStop>,
    launched: bool,
    detached: bool,
    /// Symbols breakpoints were requested for, in order.
    pub named_breakpoints: Vec<String>,
    /// Addresses one-shot breakpoints were requested for, in order.
    pub oneshot_breakpoints: Vec<u64>,
    /// Symbols for which breakpoint installation should fail.
    pub failing_breakpoints: Vec<String>,
}

impl ScriptedSession {
    pub fn new(triple: &str, pid: i32) -> Self {
        Self {
            memory: FakeMemory::new(),
            triple: triple.to_owned(),
            pid,
            exit_status: 0,
            stops: VecDeque::new(),
            current: None,
            launched: false,
            detached: false,
            named_breakpoints: Vec::new(),
            oneshot_breakpoints: Vec::new(),
            failing_breakpoints: Vec::new(),
        }
    }

    /// Append a stop to the replay script.
    pub fn push_stop(&mut self, stop: ScriptedStop) {
        self.stops.push_back(stop);
    }

    pub fn set_exit_status(&mut self, status: i32) {
        self.exit_status = status;
    }
}

impl Memory for ScriptedSession {
    fn read_memory(&self, address: u64, len: usize) -> Result<Vec<u8>, DebugError> {
        self.memory.read_memory(address, len)
    }
}

impl DebugSession for ScriptedSession {
    fn triple(&self) -> String {
        self.triple.clone()
    }

    fn pid(&self) -> i32 {
        self.pid
    }

    fn launch(
        &mut self,
        _args: &[String],
        _env: &[(String, String)],
        _cwd: &Path,
    ) -> Result<(), DebugError> {
        self.launched = true;
        Ok(())
    }

    fn attach(&mut self, pid: i32) -> Result<(), DebugError> {
        self.pid = pid;
        self.launched = true;
        Ok(())
    }

    fn breakpoint_by_name(&mut self, symbol: &str) -> Result<(), DebugError> {
        if self.failing_breakpoints.iter().any(|s| s == symbol) {
            return Err(DebugError::Breakpoint(symbol.to_owned()));
        }
        self.named_breakpoints.push(symbol.to_owned());
        Ok(())
    }

    fn oneshot_breakpoint(&mut self, address: u64) -> Result<(), DebugError> {
        self.oneshot_breakpoints.push(address);
        Ok(())
    }

    fn state(&mut self) -> ProcessState {
        if self.detached {
            return ProcessState::Detached;
        }
        if self.current.is_some() {
            return ProcessState::Stopped;
        }
        match self.stops.pop_front() {
            Some(stop) => {
                self.current = Some(stop);
                ProcessState::Stopped
            }
            None => ProcessState::Exited,
        }
    }

    fn exit_status(&self) -> i32 {
        self.exit_status
    }

    fn resume(&mut self) -> Result<(), DebugError> {
        self.current = None;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), DebugError> {
        self.detached = true;
        Ok(())
    }

    fn stop_frame(&self) -> Option<StopFrame> {
        self.current.as_ref().map(|s| StopFrame {
            thread_id: s.thread_id,
            pc: s.pc,
            function: s.function.clone(),
        })
    }

    fn read_register(&self, name: &str) -> Option<u64> {
        self.current
            .as_ref()
            .and_then(|s| s.registers.get(name).copied())
    }

    fn memory(&self) -> &dyn Memory {
        &self.memory
    }
}
