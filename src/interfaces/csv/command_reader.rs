use crate::domain::command::{Command, CommandRecord};
use crate::error::{Result, ShopError};
use std::io::Read;

/// Reads shop commands from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and tolerating rows that omit
/// trailing optional columns. Each row is converted into a validated [`Command`].
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads, deserializes and validates commands.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader.into_deserialize().map(|result| {
            let record: CommandRecord = result.map_err(ShopError::from)?;
            Command::try_from(record)
        })
    }
}
