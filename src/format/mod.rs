// Output formatters: plain text, ANSI color, JSON Lines, summary table

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::quote::quote_bytes;
use crate::syscalls::args::{ArgValue, FieldValue, RetValue, StructItem, BUFFER_DISPLAY_CAP};

/// A completed (or degraded) syscall event ready for output.
#[derive(Debug, Clone)]
pub struct SyscallEvent {
    pub pid: i32,
    pub name: String,
    pub args: Vec<ArgValue>,
    pub retval: RetValue,
    /// Seconds since the epoch at syscall entry.
    pub timestamp: f64,
}

impl SyscallEvent {
    /// Arguments with Skip sentinels elided, the only form output sees.
    fn visible_args(&self) -> impl Iterator<Item = &ArgValue> {
        self.args.iter().filter(|a| !matches!(a, ArgValue::Skip))
    }
}

pub trait Formatter {
    fn format(&self, event: &SyscallEvent) -> String;
}

/// strace-compatible plain text: `name(arg1, arg2) = ret`.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, event: &SyscallEvent) -> String {
        let args: Vec<String> = event.visible_args().map(ArgValue::render_text).collect();
        format!(
            "{}({}) = {}",
            event.name,
            args.join(", "),
            event.retval.render_text()
        )
    }
}

/// ANSI-colored variant of the text format.
pub struct ColorTextFormatter;

const RESET: &str = "\x1b[0m";
const SYSCALL: &str = "\x1b[1;36m";
const STRING: &str = "\x1b[0;33m";
const NUMBER: &str = "\x1b[0;35m";
const POINTER: &str = "\x1b[0;34m";
const FD: &str = "\x1b[0;32m";
const RETURN_OK: &str = "\x1b[1;32m";
const RETURN_ERR: &str = "\x1b[1;31m";
const PUNCT: &str = "\x1b[0;37m";

impl Formatter for ColorTextFormatter {
    fn format(&self, event: &SyscallEvent) -> String {
        let args: Vec<String> = event
            .visible_args()
            .map(|arg| {
                let color = match arg {
                    ArgValue::Str(_) | ArgValue::Buffer { .. } => Some(STRING),
                    ArgValue::Pointer(_) => Some(POINTER),
                    ArgValue::FileDescriptor(_) => Some(FD),
                    ArgValue::Int { .. } | ArgValue::Unsigned(_) | ArgValue::Flags { .. } => {
                        Some(NUMBER)
                    }
                    _ => None,
                };
                match color {
                    Some(c) => format!("{}{}{}", c, arg.render_text(), RESET),
                    None => arg.render_text(),
                }
            })
            .collect();

        let ret_color = match &event.retval {
            RetValue::Int(v) if *v < 0 => RETURN_ERR,
            _ => RETURN_OK,
        };

        format!(
            "{sys}{name}{reset}{punct}({reset}{args}{punct}){reset} {punct}={reset} {rc}{ret}{reset}",
            sys = SYSCALL,
            name = event.name,
            reset = RESET,
            punct = PUNCT,
            args = args.join(&format!("{},{} ", PUNCT, RESET)),
            rc = ret_color,
            ret = event.retval.render_text(),
        )
    }
}

/// One JSON object per line; integers stay integers, structs become nested
/// objects under an `"output"` key.
pub struct JsonFormatter;

fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Int(v) => json!(v),
        FieldValue::Uint(v) => json!(v),
        FieldValue::Str(s) => json!(s),
        FieldValue::List(items) => Value::Array(items.iter().map(field_map_to_json).collect()),
    }
}

fn field_map_to_json(fields: &Vec<(String, FieldValue)>) -> Value {
    let map: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), field_to_json(value)))
        .collect();
    Value::Object(map)
}

fn arg_to_json(arg: &ArgValue) -> Value {
    match arg {
        ArgValue::Int { value, symbolic } => match symbolic {
            Some(s) => json!(s),
            None => json!(value),
        },
        ArgValue::Unsigned(v) => json!(v),
        ArgValue::Pointer(addr) => json!(format!("0x{:x}", addr)),
        ArgValue::FileDescriptor(fd) => json!(fd),
        ArgValue::Str(s) => json!(s),
        ArgValue::Flags { value, symbolic } => match symbolic {
            Some(s) => json!(s),
            None => json!(format!("0x{:x}", value)),
        },
        ArgValue::Struct(fields) => json!({ "output": field_map_to_json(fields) }),
        ArgValue::StructArray(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    StructItem::Map(fields) => field_map_to_json(fields),
                    StructItem::Pre(s) => json!(s),
                })
                .collect(),
        ),
        ArgValue::IntPtr(v) => json!([v]),
        ArgValue::Buffer { data, .. } => json!(quote_bytes(data, BUFFER_DISPLAY_CAP)),
        ArgValue::IovecArray(entries) => Value::Array(
            entries
                .iter()
                .map(|e| {
                    json!({
                        "iov_base": e.base.clone().unwrap_or_else(|| "?".to_string()),
                        "iov_len": e.len,
                    })
                })
                .collect(),
        ),
        ArgValue::StringArray(strings) => json!(strings),
        ArgValue::Uuid(s) => json!(s),
        ArgValue::Unknown => json!("?"),
        ArgValue::Skip => Value::Null,
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, event: &SyscallEvent) -> String {
        let args: Vec<Value> = event.visible_args().map(arg_to_json).collect();
        let ret = match &event.retval {
            RetValue::Int(v) => json!(v),
            RetValue::Sym(s) => json!(s),
        };
        json!({
            "syscall": event.name,
            "args": args,
            "return": ret,
            "pid": event.pid,
            "timestamp": event.timestamp,
        })
        .to_string()
    }
}

/// Per-syscall call/error counters for the `-c` summary table.
#[derive(Debug, Default)]
pub struct SummaryFormatter {
    stats: BTreeMap<String, (u64, u64)>,
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: &SyscallEvent) {
        let entry = self.stats.entry(event.name.clone()).or_insert((0, 0));
        entry.0 += 1;
        if matches!(event.retval, RetValue::Int(v) if v < 0)
            || matches!(&event.retval, RetValue::Sym(s) if s.starts_with('-'))
        {
            entry.1 += 1;
        }
    }

    pub fn format(&self) -> String {
        if self.stats.is_empty() {
            return "No syscalls captured.\n".to_string();
        }

        let total: u64 = self.stats.values().map(|(count, _)| count).sum();
        let mut lines = vec![
            "% time     calls      errors syscall".to_string(),
            "-".repeat(50),
        ];
        for (name, (count, errors)) in &self.stats {
            let percent = *count as f64 / total as f64 * 100.0;
            let errors_str = if *errors > 0 {
                errors.to_string()
            } else {
                String::new()
            };
            lines.push(format!(
                "{:6.2} {:10} {:>10} {}",
                percent, count, errors_str, name
            ));
        }
        lines.push("-".repeat(50));
        lines.push(format!("100.00 {:10}             total", total));
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, args: Vec<ArgValue>, retval: RetValue) -> SyscallEvent {
        SyscallEvent {
            pid: 42,
            name: name.to_string(),
            args,
            retval,
            timestamp: 1700000000.5,
        }
    }

    #[test]
    fn text_format_basic() {
        let ev = event(
            "openat",
            vec![
                ArgValue::Int {
                    value: -2,
                    symbolic: Some("AT_FDCWD".into()),
                },
                ArgValue::Str("/tmp/s1".into()),
                ArgValue::Flags {
                    value: 0x601,
                    symbolic: Some("O_WRONLY|O_CREAT|O_TRUNC".into()),
                },
                ArgValue::Int {
                    value: 0o644,
                    symbolic: Some("0644".into()),
                },
            ],
            RetValue::Int(3),
        );
        assert_eq!(
            TextFormatter.format(&ev),
            "openat(AT_FDCWD, \"/tmp/s1\", O_WRONLY|O_CREAT|O_TRUNC, 0644) = 3"
        );
    }

    #[test]
    fn text_format_elides_skip() {
        let ev = event(
            "fcntl",
            vec![
                ArgValue::FileDescriptor(3),
                ArgValue::Int {
                    value: 1,
                    symbolic: Some("F_GETFD".into()),
                },
                ArgValue::Skip,
            ],
            RetValue::Int(0),
        );
        assert_eq!(TextFormatter.format(&ev), "fcntl(3, F_GETFD) = 0");
    }

    #[test]
    fn text_format_errno() {
        let ev = event(
            "open",
            vec![
                ArgValue::Str("/no/such/file".into()),
                ArgValue::Flags {
                    value: 0,
                    symbolic: Some("O_RDONLY".into()),
                },
            ],
            RetValue::Sym("-1 ENOENT (No such file or directory)".into()),
        );
        assert_eq!(
            TextFormatter.format(&ev),
            "open(\"/no/such/file\", O_RDONLY) = -1 ENOENT (No such file or directory)"
        );
    }

    #[test]
    fn json_format_preserves_types() {
        let ev = event(
            "read",
            vec![
                ArgValue::FileDescriptor(3),
                ArgValue::Buffer {
                    data: b"hi\n".to_vec(),
                    address: 0x1000,
                },
                ArgValue::Unsigned(3),
            ],
            RetValue::Int(3),
        );
        let parsed: Value = serde_json::from_str(&JsonFormatter.format(&ev)).unwrap();
        assert_eq!(parsed["syscall"], "read");
        assert_eq!(parsed["args"][0], json!(3));
        assert_eq!(parsed["args"][1], json!("hi\\n"));
        assert_eq!(parsed["args"][2], json!(3));
        assert_eq!(parsed["return"], json!(3));
        assert_eq!(parsed["pid"], json!(42));
    }

    #[test]
    fn json_struct_under_output_key() {
        let ev = event(
            "fstat",
            vec![
                ArgValue::FileDescriptor(3),
                ArgValue::Struct(vec![
                    ("st_size".into(), FieldValue::Int(11)),
                    ("st_mode".into(), FieldValue::Str("S_IFREG|0644".into())),
                ]),
            ],
            RetValue::Int(0),
        );
        let parsed: Value = serde_json::from_str(&JsonFormatter.format(&ev)).unwrap();
        assert_eq!(parsed["args"][1]["output"]["st_size"], json!(11));
        assert_eq!(parsed["args"][1]["output"]["st_mode"], json!("S_IFREG|0644"));
    }

    #[test]
    fn json_pointer_is_hex_string() {
        let ev = event("mmap", vec![ArgValue::Pointer(0)], RetValue::Int(0));
        let parsed: Value = serde_json::from_str(&JsonFormatter.format(&ev)).unwrap();
        assert_eq!(parsed["args"][0], json!("0x0"));
    }

    #[test]
    fn summary_counts_and_sorts() {
        let mut summary = SummaryFormatter::new();
        summary.add_event(&event("write", vec![], RetValue::Int(5)));
        summary.add_event(&event("open", vec![], RetValue::Int(3)));
        summary.add_event(&event(
            "open",
            vec![],
            RetValue::Sym("-1 ENOENT (No such file or directory)".into()),
        ));
        let out = summary.format();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "% time     calls      errors syscall");
        // Sorted by name: open before write
        assert!(lines[2].contains("open"));
        assert!(lines[2].contains("66.67"));
        assert!(lines[2].trim_end().contains('1')); // one error
        assert!(lines[3].contains("write"));
        assert!(out.contains("100.00"));
        assert!(out.contains("total"));
    }

    #[test]
    fn color_format_wraps_name_and_return(){
        let ev = event("close", vec![ArgValue::FileDescriptor(3)], RetValue::Int(0));
        let out = ColorTextFormatter.format(&ev);
        assert!(out.contains("\x1b[1;36mclose\x1b[0m"));
        assert!(out.contains("\x1b[0;32m3\x1b[0m"));
        assert!(out.contains("\x1b[1;32m0\x1b[0m"));
    }
}
