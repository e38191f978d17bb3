//! Constants for project descriptors and the file-type code table.

/// Extension of a project descriptor file, compared case-insensitively.
pub const PROJECT_FILE_EXTENSION: &str = "uvprojx";

/// Default traversal depth for group refresh and rebuild.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Extensions treated as compilable sources.
pub const SOURCE_EXTENSIONS: &[&str] = &[".c", ".cpp"];

/// Extensions treated as headers; folders holding these become include paths.
pub const HEADER_EXTENSIONS: &[&str] = &[".h", ".hpp"];

/// Assembly extensions, only scanned when enabled in settings.
pub const ASSEMBLY_EXTENSIONS: &[&str] = &[".s", ".asm"];

/// File kind as encoded in the descriptor's `FileType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// C source (`1`); also the fallback for unmapped extensions
    CSource,
    /// Assembly source (`2`)
    Assembly,
    /// Header or text document (`5`)
    Header,
    /// C++ source (`8`)
    CppSource,
}

impl FileType {
    /// Map a suffix (with its leading dot, e.g. `.c`) to its file type.
    ///
    /// Matching is exact. Anything unmapped falls back to [`FileType::CSource`].
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            ".h" => Self::Header,
            ".cpp" => Self::CppSource,
            ".s" | ".asm" => Self::Assembly,
            _ => Self::CSource,
        }
    }

    /// The integer code written to the descriptor.
    pub fn code(&self) -> u8 {
        match self {
            Self::CSource => 1,
            Self::Assembly => 2,
            Self::Header => 5,
            Self::CppSource => 8,
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(".c", 1)]
    #[case(".h", 5)]
    #[case(".cpp", 8)]
    #[case(".s", 2)]
    #[case(".asm", 2)]
    #[case(".hpp", 1)]
    #[case(".C", 1)]
    fn test_file_type_codes(#[case] suffix: &str, #[case] code: u8) {
        assert_eq!(FileType::from_suffix(suffix).code(), code);
    }

    #[test]
    fn test_display_writes_code() {
        assert_eq!(FileType::CppSource.to_string(), "8");
    }
}
