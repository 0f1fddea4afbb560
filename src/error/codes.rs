#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    DirectoryNotFound = 3,
    InvalidRule = 4,
    ConflictingTargets = 5,
    PermissionError = 6,
    NothingToUndo = 7,
    RenameError = 8,
    LogExportError = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
