// Typed syscall arguments
// The tagged values produced by parameter decoders and consumed by the
// output formatters.

use crate::quote::quote_bytes;

/// How many buffer bytes the text formatter shows before truncating.
pub const BUFFER_DISPLAY_CAP: usize = 32;

/// A field value inside a decoded struct.
///
/// `Str` values carry their own decoration (quotes, symbolic names, `0x...`)
/// and are printed bare.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Str(String),
    /// Nested list of field maps (e.g. the iovec array inside a msghdr).
    List(Vec<Vec<(String, FieldValue)>>),
}

impl FieldValue {
    fn render(&self) -> String {
        match self {
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Uint(v) => v.to_string(),
            FieldValue::Str(s) => s.clone(),
            FieldValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|m| render_field_map(m)).collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }
}

fn render_field_map(fields: &[(String, FieldValue)]) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.render()))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// One element of a struct array: a decoded field map or a pre-formatted
/// summary string.
#[derive(Debug, Clone, PartialEq)]
pub enum StructItem {
    Map(Vec<(String, FieldValue)>),
    Pre(String),
}

/// One entry of a scatter-gather vector. `base` is the escaped buffer
/// preview, or None when the base pointer could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct IovecEntry {
    pub base: Option<String>,
    pub len: u64,
}

/// A decoded syscall argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Signed integer, optionally with a symbolic rendering (`AT_FDCWD`).
    Int { value: i64, symbolic: Option<String> },
    Unsigned(u64),
    /// Raw address; also the fallback for failed memory reads.
    Pointer(u64),
    FileDescriptor(i64),
    /// NUL-terminated string read from the target.
    Str(String),
    /// Bitmask, symbolic when decodable (`O_WRONLY|O_CREAT`).
    Flags { value: u64, symbolic: Option<String> },
    /// Decoded struct as an ordered field map.
    Struct(Vec<(String, FieldValue)>),
    StructArray(Vec<StructItem>),
    /// Value behind an `int *`, shown as `[v]`.
    IntPtr(i64),
    /// Raw buffer contents (read/write payloads).
    Buffer { data: Vec<u8>, address: u64 },
    IovecArray(Vec<IovecEntry>),
    /// argv/envp-style string vector.
    StringArray(Vec<String>),
    Uuid(String),
    /// Argument that could not be decoded.
    Unknown,
    /// Argument that does not exist for this call; elided from output.
    Skip,
}

impl ArgValue {
    /// Plain-text rendering per the strace output conventions.
    pub fn render_text(&self) -> String {
        match self {
            ArgValue::Int { value, symbolic } => symbolic
                .clone()
                .unwrap_or_else(|| value.to_string()),
            ArgValue::Unsigned(v) => v.to_string(),
            ArgValue::Pointer(addr) => format!("0x{:x}", addr),
            ArgValue::FileDescriptor(fd) => fd.to_string(),
            ArgValue::Str(s) => {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{}\"", escaped)
            }
            ArgValue::Flags { value, symbolic } => symbolic
                .clone()
                .unwrap_or_else(|| format!("0x{:x}", value)),
            ArgValue::Struct(fields) => render_field_map(fields),
            ArgValue::StructArray(items) => {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        StructItem::Map(fields) => render_field_map(fields),
                        StructItem::Pre(s) => s.clone(),
                    })
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            ArgValue::IntPtr(v) => format!("[{}]", v),
            ArgValue::Buffer { data, .. } => {
                format!("\"{}\"", quote_bytes(data, BUFFER_DISPLAY_CAP))
            }
            ArgValue::IovecArray(entries) => {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|e| match &e.base {
                        Some(base) => {
                            format!("{{iov_base=\"{}\", iov_len={}}}", base, e.len)
                        }
                        None => format!("{{iov_base=?, iov_len={}}}", e.len),
                    })
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            ArgValue::StringArray(strings) => {
                let quoted: Vec<String> = strings.iter().map(|s| format!("\"{}\"", s)).collect();
                format!("[{}]", quoted.join(", "))
            }
            ArgValue::Uuid(s) => s.clone(),
            ArgValue::Unknown => "?".to_string(),
            ArgValue::Skip => String::new(),
        }
    }
}

/// Decoded return value of a completed syscall.
#[derive(Debug, Clone, PartialEq)]
pub enum RetValue {
    Int(i64),
    /// Symbolic rendering (errno text, `0x...` address, `?`).
    Sym(String),
}

impl RetValue {
    pub fn render_text(&self) -> String {
        match self {
            RetValue::Int(v) => v.to_string(),
            RetValue::Sym(s) => s.clone(),
        }
    }

    /// Numeric value when the return stayed numeric.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RetValue::Int(v) => Some(*v),
            RetValue::Sym(_) => None,
        }
    }
}
