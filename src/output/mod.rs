use crate::executor::{OperationRecord, RenameOperation, UndoRecord};
use std::io::{self, Write};

/// Display the planned renames in a formatted output
pub fn display_preview(operations: &[RenameOperation], writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              PREVIEW")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;

    if operations.is_empty() {
        writeln!(writer, "No files to rename.")?;
        return Ok(());
    }

    let width = operations
        .iter()
        .map(|op| op.old_name.chars().count())
        .max()
        .unwrap_or(0);

    for (i, op) in operations.iter().enumerate() {
        let marker = if op.is_noop() { "  (unchanged)" } else { "" };
        writeln!(
            writer,
            "  {:>3}. {:<width$}  ->  {}{}",
            i + 1,
            op.old_name,
            op.new_name,
            marker,
            width = width
        )?;
    }

    let changed = operations.iter().filter(|op| !op.is_noop()).count();

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} files would be renamed", changed)?;
    if changed < operations.len() {
        writeln!(writer, "  {} names unchanged", operations.len() - changed)?;
    }

    Ok(())
}

/// Display planned renames in a tab-separated format for scripting
pub fn display_preview_simple(
    operations: &[RenameOperation],
    writer: &mut impl Write,
) -> io::Result<()> {
    for op in operations {
        writeln!(writer, "{}\t{}", op.old_name, op.new_name)?;
    }
    Ok(())
}

/// Display the outcome of an applied batch
pub fn display_apply_result(records: &[OperationRecord], writer: &mut impl Write) -> io::Result<()> {
    let failed: Vec<&OperationRecord> = records.iter().filter(|r| !r.success).collect();
    let succeeded = records.len() - failed.len();

    writeln!(writer)?;
    if failed.is_empty() {
        writeln!(writer, "Successfully renamed {} files.", succeeded)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Renamed {} files with {} errors.",
        succeeded,
        failed.len()
    )?;
    writeln!(writer)?;
    for record in failed {
        writeln!(writer, "  Error: {} -> {}", record.old_name, record.new_name)?;
        if let Some(error) = &record.error {
            writeln!(writer, "         {}", error)?;
        }
    }

    Ok(())
}

/// Display the outcome of an undo
pub fn display_undo_result(results: &[UndoRecord], writer: &mut impl Write) -> io::Result<()> {
    let failed: Vec<&UndoRecord> = results.iter().filter(|r| !r.success).collect();
    let succeeded = results.len() - failed.len();

    writeln!(writer)?;
    if failed.is_empty() {
        writeln!(writer, "Successfully reverted {} files.", succeeded)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Reverted {} files with {} errors.",
        succeeded,
        failed.len()
    )?;
    writeln!(writer)?;
    for result in failed {
        writeln!(
            writer,
            "  Error: {}: {}",
            result.name,
            result.error.as_deref().unwrap_or("unknown error")
        )?;
    }

    Ok(())
}
