use std::fmt;

/// Operating system family a cleanup module may run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    MacOs,
    Linux,
    Windows,
    Unknown,
}

impl OperatingSystem {
    /// The operating system this binary has been compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unknown
        }
    }

    pub fn is_unix(&self) -> bool {
        matches!(self, Self::MacOs | Self::Linux)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
