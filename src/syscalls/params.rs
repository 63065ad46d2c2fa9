// Parameter decoders
// One decoder per argument kind; each turns a raw register/stack value into
// a typed ArgValue, possibly by reading target memory.

use crate::debug::Memory;
use crate::syscalls::args::{ArgValue, IovecEntry};
use crate::syscalls::mem;
use crate::syscalls::symbols::{self, ConstMap, FlagMap};
use crate::quote::quote_bytes;

/// Per-invocation scratch for cross-parameter coordination. Created at
/// syscall entry, carried in the pending event, dropped when it completes.
#[derive(Debug, Default, Clone)]
pub struct Scratch {
    /// MIB array stored by the sysctl name decoder for the buffer decoder.
    pub sysctl_mib: Option<Vec<i32>>,
    /// Name stored by the sysctlbyname name decoder for the buffer decoder.
    pub sysctl_name: Option<String>,
}

/// Everything a decoder may look at while decoding one argument.
pub struct DecodeCtx<'a> {
    pub mem: &'a dyn Memory,
    /// Raw 64-bit value of this argument, captured at entry.
    pub raw: u64,
    /// Raw values of all arguments, captured at entry.
    pub args: &'a [u64],
    /// Signed return value; None at entry.
    pub ret: Option<i64>,
    pub at_entry: bool,
    pub no_abbrev: bool,
    pub scratch: &'a mut Scratch,
}

impl<'a> DecodeCtx<'a> {
    pub fn raw_signed(&self) -> i64 {
        self.raw as i64
    }

    pub fn raw_signed32(&self) -> i64 {
        (self.raw as u32 as i32) as i64
    }
}

/// A syscall parameter decoder.
///
/// Returning None at entry means "OUT parameter, ask again at exit";
/// returning None at exit means "already decoded at entry". `Skip` marks an
/// argument that does not exist for this particular call.
pub trait ParamDecoder: Send + Sync {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue>;
}

pub type BoxedParam = Box<dyn ParamDecoder>;

/// When a pointer parameter's target is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

/// Shared direction gate for pointer decoders: placeholder at the wrong
/// phase, None once already decoded.
fn gate(direction: Direction, ctx: &DecodeCtx<'_>) -> Result<(), Option<ArgValue>> {
    if ctx.at_entry && direction != Direction::In {
        return Err(Some(ArgValue::Pointer(ctx.raw)));
    }
    if !ctx.at_entry && direction != Direction::Out {
        return Err(None);
    }
    Ok(())
}

// ---- scalar decoders ----

struct IntParam;

impl ParamDecoder for IntParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        Some(ArgValue::Int {
            value: ctx.raw_signed(),
            symbolic: None,
        })
    }
}

struct UnsignedParam;

impl ParamDecoder for UnsignedParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        Some(ArgValue::Unsigned(ctx.raw))
    }
}

struct PointerParam;

impl ParamDecoder for PointerParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        Some(ArgValue::Pointer(ctx.raw))
    }
}

struct FdParam;

impl ParamDecoder for FdParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        Some(ArgValue::FileDescriptor(ctx.raw_signed()))
    }
}

struct DirFdParam;

impl ParamDecoder for DirFdParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        let value = ctx.raw_signed32();
        if ctx.no_abbrev {
            return Some(ArgValue::Int {
                value,
                symbolic: Some(format!("0x{:x}", ctx.raw)),
            });
        }
        let symbolic = (value == symbols::file::AT_FDCWD).then(|| "AT_FDCWD".to_string());
        Some(ArgValue::Int { value, symbolic })
    }
}

// ---- string decoders ----

struct StringParam;

impl StringParam {
    fn read(ctx: &DecodeCtx<'_>) -> ArgValue {
        if ctx.raw == 0 {
            return ArgValue::Str("NULL".to_string());
        }
        match mem::read_cstring(ctx.mem, ctx.raw, mem::STRING_MAX) {
            Some(s) => ArgValue::Str(s),
            None => ArgValue::Pointer(ctx.raw),
        }
    }
}

impl ParamDecoder for StringParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        Some(Self::read(ctx))
    }
}

struct ArrayOfStringsParam;

impl ParamDecoder for ArrayOfStringsParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let strings = mem::read_ptr_array(ctx.mem, ctx.raw)
            .into_iter()
            .map(|ptr| {
                mem::read_cstring(ctx.mem, ptr, mem::STRING_MAX)
                    .unwrap_or_else(|| format!("0x{:x}", ptr))
            })
            .collect();
        Some(ArgValue::StringArray(strings))
    }
}

// ---- symbolic decoders ----

struct FlagsParam(FlagMap);

impl ParamDecoder for FlagsParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        let symbolic = if ctx.no_abbrev {
            None
        } else {
            symbols::decode_flags(self.0, ctx.raw)
        };
        Some(ArgValue::Flags {
            value: ctx.raw,
            symbolic,
        })
    }
}

struct ConstParam(ConstMap);

impl ParamDecoder for ConstParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        // Constant parameters are 32-bit ints in every syscall prototype.
        let value = ctx.raw_signed32();
        let symbolic = if ctx.no_abbrev {
            None
        } else {
            symbols::lookup(self.0, value).map(str::to_string)
        };
        Some(ArgValue::Int { value, symbolic })
    }
}

struct OctalParam;

impl ParamDecoder for OctalParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        let value = ctx.raw_signed();
        let symbolic = if ctx.no_abbrev {
            Some(format!("0x{:x}", ctx.raw))
        } else if value >= 0 {
            Some(format!("0{:o}", value))
        } else {
            None
        };
        Some(ArgValue::Int { value, symbolic })
    }
}

struct CustomParam(fn(i64) -> String);

impl ParamDecoder for CustomParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        let value = ctx.raw_signed();
        if ctx.no_abbrev {
            return Some(ArgValue::Int {
                value,
                symbolic: Some(format!("0x{:x}", ctx.raw)),
            });
        }
        let symbolic = (self.0)(value);
        // A decoder that just echoes the number adds nothing
        let symbolic = (symbolic != value.to_string()).then_some(symbolic);
        Some(ArgValue::Int { value, symbolic })
    }
}

// ---- memory-backed decoders ----

struct BufferParam {
    size_idx: usize,
    direction: Direction,
}

impl ParamDecoder for BufferParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if let Err(fallback) = gate(self.direction, ctx) {
            return fallback;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(&size) = ctx.args.get(self.size_idx) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        if size == 0 {
            return Some(ArgValue::Pointer(ctx.raw));
        }

        let cap = if ctx.no_abbrev {
            mem::BUFFER_MAX_NO_ABBREV
        } else {
            mem::BUFFER_MAX
        };
        let len = (size as usize).min(cap);

        match mem::read_exact(ctx.mem, ctx.raw, len) {
            Some(data) => Some(ArgValue::Buffer {
                data,
                address: ctx.raw,
            }),
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

/// Preview cap for each iovec base buffer.
const IOVEC_PREVIEW: usize = 32;

struct IovecParam {
    count_idx: usize,
    direction: Direction,
}

impl ParamDecoder for IovecParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if let Err(fallback) = gate(self.direction, ctx) {
            return fallback;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(&count) = ctx.args.get(self.count_idx) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        if count == 0 || count > 1024 {
            return Some(ArgValue::Pointer(ctx.raw));
        }

        // struct iovec is {void *iov_base; size_t iov_len;}: 16 bytes
        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, count as usize * 16) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };

        let mut entries = Vec::with_capacity(count as usize);
        for chunk in data.chunks_exact(16) {
            let base = mem::u64_at(chunk, 0);
            let len = mem::u64_at(chunk, 8);
            let preview = if base == 0 || len == 0 {
                None
            } else {
                mem::read_exact(ctx.mem, base, (len as usize).min(IOVEC_PREVIEW))
                    .map(|buf| quote_bytes(&buf, IOVEC_PREVIEW))
            };
            entries.push(IovecEntry { base: preview, len });
        }
        Some(ArgValue::IovecArray(entries))
    }
}

struct IntPtrParam {
    direction: Direction,
}

impl ParamDecoder for IntPtrParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if let Err(fallback) = gate(self.direction, ctx) {
            return fallback;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        match mem::read_i32(ctx.mem, ctx.raw) {
            Some(v) => Some(ArgValue::IntPtr(v as i64)),
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

/// Element count source for int arrays.
enum Count {
    Fixed(usize),
    Arg(usize),
}

struct IntArrayParam {
    count: Count,
    direction: Direction,
}

impl ParamDecoder for IntArrayParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if let Err(fallback) = gate(self.direction, ctx) {
            return fallback;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }

        let mut count = match self.count {
            Count::Fixed(n) => n,
            Count::Arg(idx) => match ctx.args.get(idx) {
                Some(&n) => n as usize,
                None => return Some(ArgValue::Pointer(ctx.raw)),
            },
        };
        // getgroups semantics: the return value is the real element count
        if let (Count::Arg(_), Some(ret)) = (&self.count, ctx.ret) {
            if ret >= 0 && (ret as usize) < count {
                count = ret as usize;
            }
        }
        if count == 0 || count > 1024 {
            return Some(ArgValue::Pointer(ctx.raw));
        }

        match mem::read_i32_array(ctx.mem, ctx.raw, count) {
            Some(values) => {
                let rendered: Vec<String> = values.iter().map(i32::to_string).collect();
                Some(ArgValue::Str(format!("[{}]", rendered.join(", "))))
            }
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

// ---- discriminated variant ----

/// Decodes an argument differently depending on a sibling argument's value
/// (the fcntl cmd, the open flags, the ioctl request).
pub struct VariantParam {
    pub discriminator_idx: usize,
    pub variants: Vec<(i64, BoxedParam)>,
    pub default: Option<BoxedParam>,
    /// Discriminator values for which this argument does not exist.
    pub skip_for: Vec<i64>,
    /// Bits that must be set in the discriminator for the argument to exist.
    pub skip_when_not_set: Option<u64>,
}

impl ParamDecoder for VariantParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        let Some(&disc_raw) = ctx.args.get(self.discriminator_idx) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        // Requests like TIOCSETA have the high bit set; compare the
        // discriminator as an unsigned 32-bit value.
        let disc = (disc_raw & 0xffff_ffff) as i64;

        if self.skip_for.contains(&disc) {
            return Some(ArgValue::Skip);
        }
        if let Some(mask) = self.skip_when_not_set {
            if disc_raw & mask == 0 {
                return Some(ArgValue::Skip);
            }
        }

        let inner = self
            .variants
            .iter()
            .find(|(v, _)| *v == disc)
            .map(|(_, p)| p)
            .or(self.default.as_ref());
        match inner {
            Some(param) => param.decode(ctx),
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

// ---- sysctl family ----

struct SysctlMibParam;

impl ParamDecoder for SysctlMibParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(&namelen) = ctx.args.get(1) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        if namelen == 0 {
            return Some(ArgValue::Str("NULL".to_string()));
        }
        if namelen > symbols::sysctl::CTL_MAXNAME {
            return Some(ArgValue::Str(format!("<invalid namelen={}>", namelen)));
        }

        let Some(mib) = mem::read_i32_array(ctx.mem, ctx.raw, namelen as usize) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };

        let mut parts: Vec<String> = Vec::with_capacity(mib.len());
        for (i, &val) in mib.iter().enumerate() {
            let part = match i {
                0 => symbols::lookup(symbols::sysctl::CTL_NAMES, val as i64)
                    .map(str::to_string)
                    .unwrap_or_else(|| val.to_string()),
                1 if mib[0] == symbols::sysctl::CTL_KERN => {
                    symbols::lookup(symbols::sysctl::KERN_NAMES, val as i64)
                        .map(str::to_string)
                        .unwrap_or_else(|| val.to_string())
                }
                1 if mib[0] == symbols::sysctl::CTL_HW => {
                    symbols::lookup(symbols::sysctl::HW_NAMES, val as i64)
                        .map(str::to_string)
                        .unwrap_or_else(|| val.to_string())
                }
                _ => val.to_string(),
            };
            parts.push(part);
        }

        ctx.scratch.sysctl_mib = Some(mib);
        Some(ArgValue::Str(format!("[{}]", parts.join(", "))))
    }
}

fn decode_sysctl_value(
    mem_handle: &dyn Memory,
    address: u64,
    kind: symbols::sysctl::SysctlType,
) -> ArgValue {
    use symbols::sysctl::SysctlType;
    match kind {
        SysctlType::String => match mem::read_cstring(mem_handle, address, 256) {
            Some(s) => ArgValue::Str(s),
            None => ArgValue::Pointer(address),
        },
        SysctlType::Int => match mem::read_i32(mem_handle, address) {
            Some(v) => ArgValue::Int {
                value: v as i64,
                symbolic: None,
            },
            None => ArgValue::Pointer(address),
        },
        SysctlType::Int64 => match mem::read_i64(mem_handle, address) {
            Some(v) => ArgValue::Int {
                value: v,
                symbolic: None,
            },
            None => ArgValue::Pointer(address),
        },
    }
}

struct SysctlBufferParam;

impl ParamDecoder for SysctlBufferParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 || ctx.at_entry {
            return Some(ArgValue::Pointer(ctx.raw));
        }
        let Some(kind) = ctx
            .scratch
            .sysctl_mib
            .as_deref()
            .and_then(symbols::sysctl::mib_type)
        else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        Some(decode_sysctl_value(ctx.mem, ctx.raw, kind))
    }
}

struct SysctlBynameNameParam;

impl ParamDecoder for SysctlBynameNameParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        let decoded = StringParam::read(ctx);
        if let ArgValue::Str(name) = &decoded {
            ctx.scratch.sysctl_name = Some(name.clone());
        }
        Some(decoded)
    }
}

struct SysctlBynameBufferParam;

impl ParamDecoder for SysctlBynameBufferParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 || ctx.at_entry {
            return Some(ArgValue::Pointer(ctx.raw));
        }
        let Some(kind) = ctx
            .scratch
            .sysctl_name
            .as_deref()
            .and_then(symbols::sysctl::name_type)
        else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        Some(decode_sysctl_value(ctx.mem, ctx.raw, kind))
    }
}

struct SysctlSizePointerParam;

impl ParamDecoder for SysctlSizePointerParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        match mem::read_u64(ctx.mem, ctx.raw) {
            Some(size) => Some(ArgValue::Str(format!("[{}]", size))),
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

// ---- misc pointer decoders ----

struct UuidParam;

impl ParamDecoder for UuidParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        // UUIDs are output parameters
        if ctx.at_entry {
            return Some(ArgValue::Pointer(ctx.raw));
        }
        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, 16) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        let hex: Vec<String> = data.iter().map(|b| format!("{:02X}", b)).collect();
        let joined = hex.join("");
        Some(ArgValue::Uuid(format!(
            "{}-{}-{}-{}-{}",
            &joined[0..8],
            &joined[8..12],
            &joined[12..16],
            &joined[16..20],
            &joined[20..32]
        )))
    }
}

struct TimespecParam;

impl ParamDecoder for TimespecParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, 16) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        Some(ArgValue::Struct(vec![
            (
                "tv_sec".to_string(),
                crate::syscalls::args::FieldValue::Int(mem::i64_at(&data, 0)),
            ),
            (
                "tv_nsec".to_string(),
                crate::syscalls::args::FieldValue::Int(mem::i64_at(&data, 8)),
            ),
        ]))
    }
}

// ---- constructors used by the catalog ----

pub fn int() -> BoxedParam {
    Box::new(IntParam)
}

pub fn unsigned() -> BoxedParam {
    Box::new(UnsignedParam)
}

pub fn pointer() -> BoxedParam {
    Box::new(PointerParam)
}

pub fn fd() -> BoxedParam {
    Box::new(FdParam)
}

pub fn dirfd() -> BoxedParam {
    Box::new(DirFdParam)
}

pub fn string() -> BoxedParam {
    Box::new(StringParam)
}

pub fn string_array() -> BoxedParam {
    Box::new(ArrayOfStringsParam)
}

pub fn flags(map: FlagMap) -> BoxedParam {
    Box::new(FlagsParam(map))
}

pub fn constant(map: ConstMap) -> BoxedParam {
    Box::new(ConstParam(map))
}

pub fn octal() -> BoxedParam {
    Box::new(OctalParam)
}

pub fn custom(f: fn(i64) -> String) -> BoxedParam {
    Box::new(CustomParam(f))
}

pub fn buffer(size_idx: usize, direction: Direction) -> BoxedParam {
    Box::new(BufferParam {
        size_idx,
        direction,
    })
}

pub fn iovec(count_idx: usize, direction: Direction) -> BoxedParam {
    Box::new(IovecParam {
        count_idx,
        direction,
    })
}

pub fn int_ptr(direction: Direction) -> BoxedParam {
    Box::new(IntPtrParam { direction })
}

pub fn int_array(count_idx: usize, direction: Direction) -> BoxedParam {
    Box::new(IntArrayParam {
        count: Count::Arg(count_idx),
        direction,
    })
}

/// int[2] output array (pipe/socketpair fd pairs).
pub fn fd_pair() -> BoxedParam {
    Box::new(IntArrayParam {
        count: Count::Fixed(2),
        direction: Direction::Out,
    })
}

pub fn sysctl_mib() -> BoxedParam {
    Box::new(SysctlMibParam)
}

pub fn sysctl_buffer() -> BoxedParam {
    Box::new(SysctlBufferParam)
}

pub fn sysctl_byname_name() -> BoxedParam {
    Box::new(SysctlBynameNameParam)
}

pub fn sysctl_byname_buffer() -> BoxedParam {
    Box::new(SysctlBynameBufferParam)
}

pub fn sysctl_size_ptr() -> BoxedParam {
    Box::new(SysctlSizePointerParam)
}

pub fn uuid() -> BoxedParam {
    Box::new(UuidParam)
}

pub fn timespec() -> BoxedParam {
    Box::new(TimespecParam)
}

/// Builder for [`VariantParam`].
pub struct VariantBuilder {
    inner: VariantParam,
}

pub fn variant(discriminator_idx: usize) -> VariantBuilder {
    VariantBuilder {
        inner: VariantParam {
            discriminator_idx,
            variants: Vec::new(),
            default: None,
            skip_for: Vec::new(),
            skip_when_not_set: None,
        },
    }
}

impl VariantBuilder {
    pub fn case(mut self, value: i64, param: BoxedParam) -> Self {
        self.inner.variants.push((value, param));
        self
    }

    pub fn default(mut self, param: BoxedParam) -> Self {
        self.inner.default = Some(param);
        self
    }

    pub fn skip_for(mut self, values: &[i64]) -> Self {
        self.inner.skip_for.extend_from_slice(values);
        self
    }

    pub fn skip_when_not_set(mut self, mask: u64) -> Self {
        self.inner.skip_when_not_set = Some(mask);
        self
    }

    pub fn build(self) -> BoxedParam {
        Box::new(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::symbols::file::{FD_FLAGS, F_GETFD, F_SETFD, O_CREAT};

    fn ctx<'a>(
        mem: &'a FakeMemory,
        raw: u64,
        args: &'a [u64],
        at_entry: bool,
        scratch: &'a mut Scratch,
    ) -> DecodeCtx<'a> {
        DecodeCtx {
            mem,
            raw,
            args,
            ret: if at_entry { None } else { Some(0) },
            at_entry,
            no_abbrev: false,
            scratch,
        }
    }

    #[test]
    fn string_param_reads_and_falls_back() {
        let mut fake = FakeMemory::new();
        fake.put_cstr(0x1000, "/etc/hosts");
        let mut scratch = Scratch::default();
        let args = [0x1000u64];

        let decoded = string()
            .decode(&mut ctx(&fake, 0x1000, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(decoded, ArgValue::Str("/etc/hosts".into()));

        let fallback = string()
            .decode(&mut ctx(&fake, 0x9999, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(fallback, ArgValue::Pointer(0x9999));
    }

    #[test]
    fn buffer_out_decodes_only_at_exit() {
        let mut fake = FakeMemory::new();
        fake.put(0x2000, b"hello\nworld");
        let mut scratch = Scratch::default();
        let args = [3u64, 0x2000, 11];
        let decoder = buffer(2, Direction::Out);

        // entry: placeholder
        let entry = decoder
            .decode(&mut ctx(&fake, 0x2000, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(entry, ArgValue::Pointer(0x2000));

        // exit: real contents
        let exit = decoder
            .decode(&mut ctx(&fake, 0x2000, &args, false, &mut scratch))
            .unwrap();
        assert_eq!(
            exit,
            ArgValue::Buffer {
                data: b"hello\nworld".to_vec(),
                address: 0x2000
            }
        );
    }

    #[test]
    fn buffer_in_silent_at_exit() {
        let mut fake = FakeMemory::new();
        fake.put(0x2000, b"x");
        let mut scratch = Scratch::default();
        let args = [3u64, 0x2000, 1];
        let decoder = buffer(2, Direction::In);
        assert!(decoder
            .decode(&mut ctx(&fake, 0x2000, &args, false, &mut scratch))
            .is_none());
    }

    #[test]
    fn iovec_decodes_entries() {
        let mut fake = FakeMemory::new();
        fake.put(0x5000, b"First ");
        fake.put(0x5100, b"Second ");
        // two iovecs at 0x4000
        fake.put_u64(0x4000, 0x5000);
        fake.put_u64(0x4008, 6);
        fake.put_u64(0x4010, 0x5100);
        fake.put_u64(0x4018, 7);
        let mut scratch = Scratch::default();
        let args = [3u64, 0x4000, 2];

        let decoded = iovec(2, Direction::In)
            .decode(&mut ctx(&fake, 0x4000, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::IovecArray(vec![
                IovecEntry {
                    base: Some("First ".into()),
                    len: 6
                },
                IovecEntry {
                    base: Some("Second ".into()),
                    len: 7
                },
            ])
        );
    }

    #[test]
    fn variant_skips_missing_arg() {
        let fake = FakeMemory::new();
        let mut scratch = Scratch::default();
        let decoder = variant(1)
            .case(F_SETFD, flags(FD_FLAGS))
            .skip_for(&[F_GETFD])
            .default(int())
            .build();

        // fcntl(fd, F_GETFD): third argument does not exist
        let args = [3u64, F_GETFD as u64, 0];
        let skipped = decoder
            .decode(&mut ctx(&fake, 0, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(skipped, ArgValue::Skip);

        // fcntl(fd, F_SETFD, FD_CLOEXEC)
        let args = [3u64, F_SETFD as u64, 1];
        let decoded = decoder
            .decode(&mut ctx(&fake, 1, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Flags {
                value: 1,
                symbolic: Some("FD_CLOEXEC".into())
            }
        );
    }

    #[test]
    fn variant_skip_when_not_set() {
        let fake = FakeMemory::new();
        let mut scratch = Scratch::default();
        let decoder = variant(1).skip_when_not_set(O_CREAT).default(octal()).build();

        // open(path, O_RDONLY): no mode argument
        let args = [0x1000u64, 0, 0];
        assert_eq!(
            decoder
                .decode(&mut ctx(&fake, 0, &args, true, &mut scratch))
                .unwrap(),
            ArgValue::Skip
        );

        // open(path, O_CREAT|O_WRONLY, 0644)
        let args = [0x1000u64, 0x201, 0o644];
        assert_eq!(
            decoder
                .decode(&mut ctx(&fake, 0o644, &args, true, &mut scratch))
                .unwrap(),
            ArgValue::Int {
                value: 0o644,
                symbolic: Some("0644".into())
            }
        );
    }

    #[test]
    fn sysctl_mib_populates_scratch() {
        let mut fake = FakeMemory::new();
        fake.put_i32(0x3000, 1); // CTL_KERN
        fake.put_i32(0x3004, 1); // KERN_OSTYPE
        let mut scratch = Scratch::default();
        let args = [0x3000u64, 2, 0, 0, 0, 0];

        let decoded = sysctl_mib()
            .decode(&mut ctx(&fake, 0x3000, &args, true, &mut scratch))
            .unwrap();
        assert_eq!(decoded, ArgValue::Str("[CTL_KERN, KERN_OSTYPE]".into()));
        assert_eq!(scratch.sysctl_mib, Some(vec![1, 1]));
    }

    #[test]
    fn sysctl_buffer_uses_mib_cache() {
        let mut fake = FakeMemory::new();
        fake.put_cstr(0x6000, "Darwin");
        let mut scratch = Scratch {
            sysctl_mib: Some(vec![1, 1]),
            sysctl_name: None,
        };
        let args = [0x3000u64, 2, 0x6000, 0, 0, 0];

        let decoded = sysctl_buffer()
            .decode(&mut ctx(&fake, 0x6000, &args, false, &mut scratch))
            .unwrap();
        assert_eq!(decoded, ArgValue::Str("Darwin".into()));
    }

    #[test]
    fn uuid_formats_uppercase() {
        let mut fake = FakeMemory::new();
        fake.put(
            0x7000,
            &[
                0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6, 0x78, 0x90, 0xab, 0xcd, 0xef, 0x12, 0x34,
                0x56, 0x78, 0x90,
            ],
        );
        let mut scratch = Scratch::default();
        let args = [0x7000u64];
        let decoded = uuid()
            .decode(&mut ctx(&fake, 0x7000, &args, false, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Uuid("A1B2C3D4-E5F6-7890-ABCD-EF1234567890".into())
        );
    }

    #[test]
    fn int_array_clamps_to_return_value() {
        let mut fake = FakeMemory::new();
        for i in 0..8 {
            fake.put_i32(0x8000 + i * 4, (i + 1) as i32);
        }
        let mut scratch = Scratch::default();
        let args = [8u64, 0x8000];
        let decoder = int_array(0, Direction::Out);

        let mut c = ctx(&fake, 0x8000, &args, false, &mut scratch);
        c.ret = Some(3); // getgroups returned 3
        let decoded = decoder.decode(&mut c).unwrap();
        assert_eq!(decoded, ArgValue::Str("[1, 2, 3]".into()));
    }
}
