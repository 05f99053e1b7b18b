//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// File copy operations.
    Copy,
    /// File and directory removal.
    Del,
    /// File list building.
    Flist,
    /// Names of entries selected by the filter.
    Name,
    /// Entries skipped by the filter or a copy hook.
    Skip,
}

impl InfoFlag {
    /// Every info flag in declaration order.
    pub const ALL: [Self; 5] = [Self::Copy, Self::Del, Self::Flist, Self::Name, Self::Skip];

    /// Token used for this flag on the command line and in tracing targets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Del => "del",
            Self::Flist => "flist",
            Self::Name => "name",
            Self::Skip => "skip",
        }
    }

    /// Looks a flag up by its token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Debug flags for internal diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Removal internals.
    Del,
    /// Directories skipped because they were already visited.
    Dup,
    /// Pattern compilation and evaluation.
    Filter,
    /// Directory traversal.
    Flist,
}

impl DebugFlag {
    /// Every debug flag in declaration order.
    pub const ALL: [Self; 4] = [Self::Del, Self::Dup, Self::Filter, Self::Flist];

    /// Token used for this flag on the command line and in tracing targets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Del => "del",
            Self::Dup => "dup",
            Self::Filter => "filter",
            Self::Flist => "flist",
        }
    }

    /// Looks a flag up by its token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// File copy operations level.
    pub copy: u8,
    /// Removal level.
    pub del: u8,
    /// File list building level.
    pub flist: u8,
    /// Selected entry names level.
    pub name: u8,
    /// Skipped entries level.
    pub skip: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Copy => self.copy,
            InfoFlag::Del => self.del,
            InfoFlag::Flist => self.flist,
            InfoFlag::Name => self.name,
            InfoFlag::Skip => self.skip,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Copy => self.copy = level,
            InfoFlag::Del => self.del = level,
            InfoFlag::Flist => self.flist = level,
            InfoFlag::Name => self.name = level,
            InfoFlag::Skip => self.skip = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in InfoFlag::ALL {
            self.set(flag, level);
        }
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Removal internals level.
    pub del: u8,
    /// Duplicate directory detection level.
    pub dup: u8,
    /// Filter evaluation level.
    pub filter: u8,
    /// Traversal level.
    pub flist: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Del => self.del,
            DebugFlag::Dup => self.dup,
            DebugFlag::Filter => self.filter,
            DebugFlag::Flist => self.flist,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Del => self.del = level,
            DebugFlag::Dup => self.dup = level,
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Flist => self.flist = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}
