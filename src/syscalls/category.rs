// Syscall categories, matching strace's -e trace= classes

use std::fmt;
use std::str::FromStr;

/// Category a syscall belongs to. Single-tag: every syscall has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    File,
    Network,
    Process,
    Memory,
    Signal,
    Ipc,
    Thread,
    Time,
    Sysinfo,
    Security,
    Debug,
    Misc,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::File,
        Category::Network,
        Category::Process,
        Category::Memory,
        Category::Signal,
        Category::Ipc,
        Category::Thread,
        Category::Time,
        Category::Sysinfo,
        Category::Security,
        Category::Debug,
        Category::Misc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::File => "file",
            Category::Network => "network",
            Category::Process => "process",
            Category::Memory => "memory",
            Category::Signal => "signal",
            Category::Ipc => "ipc",
            Category::Thread => "thread",
            Category::Time => "time",
            Category::Sysinfo => "sysinfo",
            Category::Security => "security",
            Category::Debug => "debug",
            Category::Misc => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_names() {
        for cat in Category::ALL {
            assert_eq!(cat.name().parse::<Category>(), Ok(cat));
        }
        assert!("bogus".parse::<Category>().is_err());
    }
}
