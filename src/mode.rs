// src/mode.rs - Language modes and their comment syntax

use std::fmt;
use std::str::FromStr;

/// Programming language the buffer is edited as.
///
/// The mode only selects comment syntax and the file extension shown for
/// unnamed buffers; it never changes how text is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Java,
    Python,
    Cpp,
    C,
    Ruby,
    JavaScript,
}

/// (mode, id, display name, extension, line comment prefix)
const MODE_TABLE: &[(Mode, &str, &str, &str, &str)] = &[
    (Mode::Java, "java", "Java", "java", "// "),
    (Mode::Python, "python", "Python", "py", "# "),
    (Mode::Cpp, "cpp", "C++", "cpp", "// "),
    (Mode::C, "c", "C", "c", "// "),
    (Mode::Ruby, "ruby", "Ruby", "rb", "# "),
    (Mode::JavaScript, "javascript", "JavaScript", "js", "// "),
];

const DEFAULT_COMMENT_PREFIX: &str = "// ";

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Java,
        Mode::Python,
        Mode::Cpp,
        Mode::C,
        Mode::Ruby,
        Mode::JavaScript,
    ];

    fn row(self) -> Option<&'static (Mode, &'static str, &'static str, &'static str, &'static str)> {
        MODE_TABLE.iter().find(|row| row.0 == self)
    }

    pub fn id(self) -> &'static str {
        self.row().map(|row| row.1).unwrap_or("java")
    }

    pub fn display_name(self) -> &'static str {
        self.row().map(|row| row.2).unwrap_or("Java")
    }

    pub fn extension(self) -> &'static str {
        self.row().map(|row| row.3).unwrap_or("java")
    }

    /// Prefix inserted by the toggle-comment command, including its trailing space.
    pub fn comment_prefix(self) -> &'static str {
        self.row().map(|row| row.4).unwrap_or(DEFAULT_COMMENT_PREFIX)
    }

    /// File name used when the buffer has no path, e.g. `solution.py`.
    pub fn default_file_name(self) -> String {
        format!("solution.{}", self.extension())
    }

    pub fn from_extension(ext: &str) -> Option<Mode> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "cc" | "cxx" | "hpp" => return Some(Mode::Cpp),
            "h" => return Some(Mode::C),
            "mjs" | "cjs" => return Some(Mode::JavaScript),
            _ => {}
        }
        MODE_TABLE.iter().find(|row| row.3 == ext).map(|row| row.0)
    }

    /// Next mode in the selector order, wrapping around.
    pub fn next(self) -> Mode {
        let idx = Mode::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Mode::ALL[(idx + 1) % Mode::ALL.len()]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        match id.as_str() {
            "c++" => return Ok(Mode::Cpp),
            "py" => return Ok(Mode::Python),
            "js" => return Ok(Mode::JavaScript),
            "rb" => return Ok(Mode::Ruby),
            _ => {}
        }
        MODE_TABLE
            .iter()
            .find(|row| row.1 == id)
            .map(|row| row.0)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}
