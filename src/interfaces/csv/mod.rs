//! CSV adapters used by the command-line front end.

pub mod balance_writer;
pub mod journal;
pub mod journal_reader;
pub mod roster_reader;

/// Shared reader settings: trimmed fields, tolerant of short rows.
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).flexible(true);
    builder
}
