// Central syscall registry

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::debug;

use crate::syscalls::category::Category;
use crate::syscalls::defs::{all_syscalls, SyscallDef};

lazy_static! {
    /// Process-wide registry, built once from the static catalog.
    pub static ref REGISTRY: SyscallRegistry = SyscallRegistry::new();
}

/// Registry of every known syscall, keyed by name and by number.
pub struct SyscallRegistry {
    defs: Vec<SyscallDef>,
    by_name: HashMap<&'static str, usize>,
    by_number: HashMap<i32, usize>,
}

impl SyscallRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            defs: Vec::new(),
            by_name: HashMap::new(),
            by_number: HashMap::new(),
        };
        for def in all_syscalls() {
            registry.register(def);
        }
        registry
    }

    fn register(&mut self, def: SyscallDef) {
        // The catalog is deduplicated by hand; reject stragglers here so a
        // later definition can never shadow an earlier one.
        if self.by_name.contains_key(def.name) {
            debug!(name = def.name, "duplicate syscall definition ignored");
            return;
        }
        let index = self.defs.len();
        self.by_name.insert(def.name, index);
        self.by_number.entry(def.number).or_insert(index);
        self.defs.push(def);
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&SyscallDef> {
        self.by_name.get(name).map(|&i| &self.defs[i])
    }

    pub fn lookup_by_number(&self, number: i32) -> Option<&SyscallDef> {
        self.by_number.get(&number).map(|&i| &self.defs[i])
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.lookup_by_name(name).map(|def| def.category)
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &SyscallDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for SyscallRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_the_basics() {
        let reg = SyscallRegistry::new();
        for name in ["open", "read", "write", "close", "socket", "sysctl", "kevent"] {
            assert!(reg.lookup_by_name(name).is_some(), "missing {}", name);
        }
        assert!(reg.lookup_by_name("not_a_syscall").is_none());
    }

    #[test]
    fn names_are_unique() {
        let reg = SyscallRegistry::new();
        let mut seen = std::collections::HashSet::new();
        for def in reg.iter_all() {
            assert!(seen.insert(def.name), "duplicate name {}", def.name);
        }
    }

    #[test]
    fn arity_matches_prototypes() {
        let reg = SyscallRegistry::new();
        assert_eq!(reg.lookup_by_name("open").unwrap().params.len(), 3);
        assert_eq!(reg.lookup_by_name("openat").unwrap().params.len(), 4);
        assert_eq!(reg.lookup_by_name("fcntl").unwrap().params.len(), 3);
        assert_eq!(reg.lookup_by_name("close").unwrap().params.len(), 1);
        assert_eq!(reg.lookup_by_name("fork").unwrap().params.len(), 0);
        assert_eq!(reg.lookup_by_name("mmap").unwrap().params.len(), 6);
    }

    #[test]
    fn categories_resolve() {
        let reg = SyscallRegistry::new();
        assert_eq!(reg.category_of("open"), Some(Category::File));
        assert_eq!(reg.category_of("socket"), Some(Category::Network));
        assert_eq!(reg.category_of("msync"), Some(Category::Memory));
        assert_eq!(reg.category_of("sigprocmask"), Some(Category::Signal));
        assert_eq!(reg.category_of("sysctlbyname"), Some(Category::Sysinfo));
    }

    #[test]
    fn variadic_markers() {
        let reg = SyscallRegistry::new();
        assert_eq!(reg.lookup_by_name("fcntl").unwrap().variadic_start, Some(2));
        assert_eq!(reg.lookup_by_name("ioctl").unwrap().variadic_start, Some(2));
        assert_eq!(reg.lookup_by_name("open").unwrap().variadic_start, Some(2));
        assert_eq!(reg.lookup_by_name("openat").unwrap().variadic_start, Some(3));
        assert_eq!(reg.lookup_by_name("semctl").unwrap().variadic_start, Some(3));
        assert_eq!(reg.lookup_by_name("read").unwrap().variadic_start, None);
    }

    #[test]
    fn nocancel_wrappers_present() {
        let reg = SyscallRegistry::new();
        for name in [
            "__read_nocancel",
            "__write_nocancel",
            "__open_nocancel",
            "__close_nocancel",
            "__fcntl_nocancel",
            "__recvmsg_nocancel",
            "__select_nocancel",
        ] {
            assert!(reg.lookup_by_name(name).is_some(), "missing {}", name);
        }
    }
}
