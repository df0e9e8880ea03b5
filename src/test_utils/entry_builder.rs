use crate::EntryType;
use crate::LogEntry;

/// Builds consecutive log entries within one term.
pub struct EntryBuilder {
    index: u64,
    term: u64,
}

impl EntryBuilder {
    pub fn new(
        start_index: u64,
        term: u64,
    ) -> Self {
        Self {
            index: start_index,
            term,
        }
    }

    pub fn command(
        mut self,
        data: &[u8],
    ) -> (Self, LogEntry) {
        let entry = LogEntry::command(self.index, self.term, data.to_vec());
        self.index += 1;
        (self, entry)
    }

    pub fn config(
        mut self,
        data: &[u8],
    ) -> (Self, LogEntry) {
        let entry = LogEntry::new(self.index, self.term, EntryType::Configuration, data.to_vec());
        self.index += 1;
        (self, entry)
    }

    pub fn noop(mut self) -> (Self, LogEntry) {
        let entry = LogEntry::noop(self.index, self.term);
        self.index += 1;
        (self, entry)
    }
}
